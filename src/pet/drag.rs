use tracing::debug;

use crate::assets::FrameStore;
use crate::host::RenderHost;
use crate::pet::{ModePicker, SpriteState};

/// Pointer pressed at (col, row). Grabs the sprite if the press lands on it:
/// records the pointer's offset within the sprite, suspends the behavior
/// machine and shows the first drag frame. Returns whether a grab happened.
pub fn on_press(
    state: &mut SpriteState,
    col: i32,
    row: i32,
    frames: &FrameStore,
    host: &mut dyn RenderHost,
) -> bool {
    if !state.hit_test(col, row) {
        return false;
    }
    state.dragging = true;
    state.vy = 0.0;
    state.drag_offset = (col - state.x.round() as i32, row - state.y.round() as i32);
    state.drag_cycle = 0;
    host.set_frame(frames.drag_sequence().frame(0));
    debug!(col, row, "sprite grabbed");
    true
}

/// Pointer moved while the button is held: the sprite follows, anchored at
/// the recorded offset. Deliberately unclamped — the sprite may leave the
/// screen transiently and gets pulled back by the clamp on the next tick
/// after release.
pub fn on_move(state: &mut SpriteState, col: i32, row: i32, host: &mut dyn RenderHost) {
    if !state.dragging {
        return;
    }
    let (dx, dy) = state.drag_offset;
    state.x = (col - dx) as f32;
    state.y = (row - dy) as f32;
    host.reposition(col - dx, row - dy);
}

/// Pointer released: drop the sprite and resume the behavior machine. The
/// animation cycle restarts and a fresh behavior is drawn, so the next tick
/// picks up with gravity and the new mode.
pub fn on_release(state: &mut SpriteState, picker: &mut dyn ModePicker) {
    if !state.dragging {
        return;
    }
    state.dragging = false;
    state.vy = 0.0;
    state.cycle = 0;
    state.mode = picker.pick();
    debug!(mode = ?state.mode, "sprite released");
}

/// Drag-visual tick, fired on its own 100 ms cadence. Ignored unless a drag
/// is in progress; with a one-frame drag sequence this is a plain repaint.
pub fn drag_tick(state: &mut SpriteState, frames: &FrameStore, host: &mut dyn RenderHost) {
    if !state.dragging {
        return;
    }
    let sequence = frames.drag_sequence();
    state.drag_cycle = (state.drag_cycle + 1) % sequence.len();
    host.set_frame(sequence.frame(state.drag_cycle));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::test_support::RecordingHost;
    use crate::pet::test_support::ScriptedPicker;
    use crate::pet::{behavior, Mode, ScreenBounds};
    use image::RgbaImage;

    fn store(drag_len: usize) -> FrameStore {
        let frame = || RgbaImage::from_pixel(20, 10, image::Rgba([255, 255, 255, 255]));
        FrameStore::from_frames(
            vec![frame(), frame()],
            vec![frame()],
            vec![frame()],
            (0..drag_len).map(|_| frame()).collect(),
        )
    }

    fn grabbed_state(picker: &mut dyn ModePicker) -> SpriteState {
        // 20x10 px sprite -> 20 cols x 5 rows
        let mut state = SpriteState::new(ScreenBounds::new(2000, 1000), 20, 5, picker);
        state.x = 300.0;
        state.y = 400.0;
        state
    }

    #[test]
    fn test_press_outside_sprite_is_ignored() {
        let frames = store(1);
        let mut picker = ScriptedPicker::new(vec![Mode::Idle]);
        let mut state = grabbed_state(&mut picker);
        let mut host = RecordingHost::default();

        assert!(!on_press(&mut state, 10, 10, &frames, &mut host));
        assert!(!state.dragging);
        assert!(host.frames.is_empty());
    }

    #[test]
    fn test_drag_move_follows_pointer_at_grab_offset() {
        let frames = store(1);
        let mut picker = ScriptedPicker::new(vec![Mode::Idle]);
        let mut state = grabbed_state(&mut picker);
        let mut host = RecordingHost::default();

        // Grab 10 cells into the sprite on both axes
        assert!(on_press(&mut state, 310, 404, &frames, &mut host));
        assert_eq!(state.drag_offset, (10, 4));
        assert_eq!(host.frames.len(), 1);

        on_move(&mut state, 320, 414, &mut host);
        assert_eq!(state.x, 310.0);
        assert_eq!(state.y, 410.0);
        assert_eq!(host.positions.last(), Some(&(310, 410)));
    }

    #[test]
    fn test_drag_move_is_unclamped() {
        let frames = store(1);
        let mut picker = ScriptedPicker::new(vec![Mode::Idle]);
        let mut state = grabbed_state(&mut picker);
        let mut host = RecordingHost::default();

        on_press(&mut state, 310, 404, &frames, &mut host);
        on_move(&mut state, 2, 1, &mut host);
        assert_eq!(state.x, -8.0);
        assert_eq!(state.y, -3.0);
        assert_eq!(host.positions.last(), Some(&(-8, -3)));
    }

    #[test]
    fn test_release_resets_and_resumes() {
        let frames = store(1);
        let mut picker = ScriptedPicker::new(vec![Mode::Idle, Mode::WalkRight]);
        let mut state = grabbed_state(&mut picker);
        let mut host = RecordingHost::default();

        on_press(&mut state, 310, 404, &frames, &mut host);
        state.cycle = 1;
        on_release(&mut state, &mut picker);

        assert!(!state.dragging);
        assert_eq!(state.vy, 0.0);
        assert_eq!(state.cycle, 0);
        assert_eq!(state.mode, Mode::WalkRight);

        // The next behavior tick runs again: gravity pulls, walking resumes
        let x_before = state.x;
        behavior::tick(&mut state, &frames, &mut picker, &mut host);
        assert_eq!(state.vy, 0.5);
        assert!(state.x > x_before);
    }

    #[test]
    fn test_drag_tick_cycles_drag_frames() {
        let frames = store(3);
        let mut picker = ScriptedPicker::new(vec![Mode::Idle]);
        let mut state = grabbed_state(&mut picker);
        let mut host = RecordingHost::default();

        // Not dragging: nothing happens
        drag_tick(&mut state, &frames, &mut host);
        assert!(host.frames.is_empty());

        on_press(&mut state, 310, 404, &frames, &mut host);
        for expected in [1usize, 2, 0, 1] {
            drag_tick(&mut state, &frames, &mut host);
            assert_eq!(state.drag_cycle, expected);
        }
        // Press published frame 0, then four cycle frames
        assert_eq!(host.frames.len(), 5);
    }

    #[test]
    fn test_behavior_ticks_cannot_move_a_dragged_sprite() {
        let frames = store(1);
        let mut picker = ScriptedPicker::new(vec![Mode::WalkLeft]);
        let mut state = grabbed_state(&mut picker);
        let mut host = RecordingHost::default();

        on_press(&mut state, 310, 404, &frames, &mut host);
        on_move(&mut state, 100, 100, &mut host);
        let (x, y) = (state.x, state.y);

        for _ in 0..30 {
            behavior::tick(&mut state, &frames, &mut picker, &mut host);
        }
        assert_eq!((state.x, state.y), (x, y));
    }
}
