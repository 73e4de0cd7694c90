use tracing::trace;

use crate::assets::FrameStore;
use crate::host::RenderHost;
use crate::pet::{Mode, ModePicker, SpriteState, FRAME_CADENCE, GRAVITY, WALK_STEP};

/// One behavior tick. No-op while the sprite is being dragged; otherwise a
/// total function over the in-memory state — nothing here can fail.
pub fn tick(
    state: &mut SpriteState,
    frames: &FrameStore,
    picker: &mut dyn ModePicker,
    host: &mut dyn RenderHost,
) {
    if state.dragging {
        return;
    }

    // Gravity. y grows downward, so at-or-below the ground threshold counts
    // as resting.
    if state.y < state.ground_y {
        state.vy += GRAVITY;
        state.y += state.vy;
        if state.y > state.ground_y {
            state.y = state.ground_y;
            state.vy = 0.0;
        }
    } else {
        state.vy = 0.0;
    }

    // Horizontal displacement
    match state.mode {
        Mode::Idle => {}
        Mode::WalkLeft => state.x -= WALK_STEP,
        Mode::WalkRight => state.x += WALK_STEP,
    }

    // Animation cadence: advance the cycle every FRAME_CADENCE ticks and
    // publish the new frame. A wrap back to 0 ends the cycle and is the one
    // moment a new behavior is drawn.
    state.anim_counter += 1;
    if state.anim_counter >= FRAME_CADENCE {
        state.anim_counter = 0;
        let sequence = frames.sequence(state.mode);
        state.cycle = (state.cycle + 1) % sequence.len();
        host.set_frame(sequence.frame(state.cycle));

        if state.cycle == 0 {
            state.mode = picker.pick();
            trace!(mode = ?state.mode, "cycle wrapped, new behavior");
        }
    }

    // Keep the sprite on screen
    state.x = state.x.clamp(0.0, state.max_x());
    state.y = state.y.clamp(0.0, state.ground_y);

    host.reposition(state.x.round() as i32, state.y.round() as i32);
}
