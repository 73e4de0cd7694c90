use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::assets::FrameStore;
use crate::event::Event;
use crate::host::TerminalHost;
use crate::pet::{behavior, drag, ModePicker, ScreenBounds, SpriteState};

/// Application state: the sprite, its frames, the mode picker and the host
/// surface. All of it is owned here and mutated only from `handle_event`,
/// which runs on the single event-loop task.
pub struct App {
    pub state: SpriteState,
    pub frames: Arc<FrameStore>,
    pub host: TerminalHost,
    pub should_quit: bool,
    picker: Box<dyn ModePicker>,
}

impl App {
    pub fn new(frames: Arc<FrameStore>, bounds: ScreenBounds, mut picker: Box<dyn ModePicker>) -> Self {
        let state = SpriteState::new(bounds, frames.cols(), frames.rows(), picker.as_mut());
        Self {
            state,
            frames,
            host: TerminalHost::new(),
            should_quit: false,
            picker,
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Tick => {
                behavior::tick(
                    &mut self.state,
                    &self.frames,
                    self.picker.as_mut(),
                    &mut self.host,
                );
            }
            Event::DragTick => {
                drag::drag_tick(&mut self.state, &self.frames, &mut self.host);
            }
            Event::Resize(w, h) => {
                self.state.set_bounds(ScreenBounds::new(w as u32, h as u32));
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                drag::on_press(&mut self.state, col, row, &self.frames, &mut self.host);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                drag::on_move(&mut self.state, col, row, &mut self.host);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                drag::on_release(&mut self.state, self.picker.as_mut());
            }
            _ => {}
        }
    }
}
