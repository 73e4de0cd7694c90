use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Application-level events
#[derive(Debug, Clone)]
pub enum Event {
    /// User key press
    Key(KeyEvent),
    /// Mouse press / drag / release
    Mouse(MouseEvent),
    /// Behavior tick — drives gravity, walking and the idle/walk animation
    Tick,
    /// Drag-visual tick — drives the drag frame cycle, ignored while not dragging
    DragTick,
    /// Terminal resize
    Resize(u16, u16),
}

/// Handles event collection from multiple sources.
///
/// Uses crossterm's async `EventStream` (via `futures::StreamExt`) instead of
/// blocking `event::poll()` / `event::read()`, so no tokio worker thread is
/// ever blocked. Ticks come from two interval tasks: the main behavior tick
/// and the slower drag-frame tick. All events funnel into one channel and are
/// consumed by a single task, which is what makes the sprite state safe to
/// mutate without locks.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    /// Create a new event handler. Spawns background tasks for async input
    /// and the two tick cadences.
    pub fn new(tick_rate: Duration, drag_frame_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _tx = tx.clone();
        let stop = Arc::new(AtomicBool::new(false));

        // Async input task — keys, mouse, resize
        let input_tx = tx.clone();
        let input_stop = stop.clone();
        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                let maybe_event = reader.next().await;
                if input_stop.load(Ordering::Relaxed) {
                    return;
                }
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) => {
                        if key.kind == KeyEventKind::Press
                            && input_tx.send(Event::Key(key)).is_err()
                        {
                            return;
                        }
                    }
                    Some(Ok(CrosstermEvent::Mouse(mouse))) => {
                        if input_tx.send(Event::Mouse(mouse)).is_err() {
                            return;
                        }
                    }
                    Some(Ok(CrosstermEvent::Resize(w, h))) => {
                        if input_tx.send(Event::Resize(w, h)).is_err() {
                            return;
                        }
                    }
                    Some(Err(_)) | None => {
                        // Stream ended or errored — exit gracefully
                        return;
                    }
                    _ => {}
                }
            }
        });

        // Behavior tick task
        spawn_ticker(tx.clone(), stop.clone(), tick_rate, Event::Tick);

        // Drag-frame tick task. Always armed; the app drops DragTick events
        // while the sprite is not being dragged.
        spawn_ticker(tx.clone(), stop.clone(), drag_frame_rate, Event::DragTick);

        Self { rx, _tx: tx, stop }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Signal all background tasks to stop
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

fn spawn_ticker(
    tx: mpsc::UnboundedSender<Event>,
    stop: Arc<AtomicBool>,
    period: Duration,
    event: Event,
) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if stop.load(Ordering::Relaxed) {
                return;
            }
            if tx.send(event.clone()).is_err() {
                return;
            }
        }
    });
}
