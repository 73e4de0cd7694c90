pub mod behavior;
pub mod drag;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Physics constants ─────────────────────────────────────────────────
// Tuned against the 40 ms behavior tick. Units are terminal cells:
// x in columns, y in rows.

/// Downward acceleration per tick while airborne
pub const GRAVITY: f32 = 0.5;
/// Horizontal displacement per tick while walking
pub const WALK_STEP: f32 = 4.0;
/// Ticks between animation-frame advances
pub const FRAME_CADENCE: u32 = 7;
/// Spawn column (clamped into bounds at startup)
pub const INITIAL_X: f32 = 500.0;
/// Rows kept free between the sprite's feet and the bottom edge
pub const GROUND_MARGIN: u32 = 1;

// ── Behavior mode ─────────────────────────────────────────────────────

/// What the companion is currently doing. Exactly one mode is active at a
/// time; it selects both the displayed frame sequence and the horizontal
/// displacement applied each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    WalkLeft,
    WalkRight,
}

/// Uniform-random source for behavior modes. Injectable so tests can script
/// a deterministic sequence.
pub trait ModePicker {
    fn pick(&mut self) -> Mode;
}

/// Production picker: uniform over the three modes.
pub struct UniformPicker {
    rng: StdRng,
}

impl UniformPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for UniformPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ModePicker for UniformPicker {
    fn pick(&mut self) -> Mode {
        match self.rng.random_range(0..3) {
            0 => Mode::Idle,
            1 => Mode::WalkLeft,
            _ => Mode::WalkRight,
        }
    }
}

// ── Screen bounds ─────────────────────────────────────────────────────

/// Host surface size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenBounds {
    pub width: u32,
    pub height: u32,
}

impl ScreenBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

// ── Sprite state ──────────────────────────────────────────────────────

/// The companion's complete mutable state. One instance, owned by the app
/// and passed explicitly to the behavior and drag steps; all mutation
/// happens on the single event-loop task, so no locking is needed.
#[derive(Debug)]
pub struct SpriteState {
    /// Sprite top-left, in cells. May leave the screen transiently while
    /// being dragged; clamped back on the next behavior tick.
    pub x: f32,
    pub y: f32,
    /// Vertical velocity, cells/tick. Zero while resting or dragging.
    pub vy: f32,
    pub mode: Mode,
    /// Index into the active frame sequence; wraps modulo its length.
    pub cycle: usize,
    /// Ticks since the last animation-frame advance.
    pub anim_counter: u32,
    pub dragging: bool,
    /// Index into the drag sequence, advanced on its own cadence.
    pub drag_cycle: usize,
    /// Pointer offset within the sprite recorded at grab time.
    pub drag_offset: (i32, i32),
    /// Floor for `y`, derived from the screen height.
    pub ground_y: f32,
    pub bounds: ScreenBounds,
    /// Sprite footprint in cells, fixed by the loaded frames.
    pub sprite_cols: u32,
    pub sprite_rows: u32,
}

impl SpriteState {
    /// Fresh state at spawn: top of the screen at `INITIAL_X` (clamped),
    /// no velocity, a random initial mode, not dragging.
    pub fn new(
        bounds: ScreenBounds,
        sprite_cols: u32,
        sprite_rows: u32,
        picker: &mut dyn ModePicker,
    ) -> Self {
        let mut state = Self {
            x: INITIAL_X,
            y: 0.0,
            vy: 0.0,
            mode: picker.pick(),
            cycle: 0,
            anim_counter: 0,
            dragging: false,
            drag_cycle: 0,
            drag_offset: (0, 0),
            ground_y: 0.0,
            bounds,
            sprite_cols,
            sprite_rows,
        };
        state.set_bounds(bounds);
        state.x = state.x.clamp(0.0, state.max_x());
        state
    }

    /// Largest column the sprite's left edge may occupy.
    pub fn max_x(&self) -> f32 {
        (self.bounds.width.saturating_sub(self.sprite_cols)) as f32
    }

    /// Update screen bounds and re-derive the ground level. Called once at
    /// startup and again on terminal resize.
    pub fn set_bounds(&mut self, bounds: ScreenBounds) {
        self.bounds = bounds;
        self.ground_y = bounds
            .height
            .saturating_sub(self.sprite_rows + GROUND_MARGIN) as f32;
    }

    /// True if the cell at (col, row) lies within the sprite's footprint.
    pub fn hit_test(&self, col: i32, row: i32) -> bool {
        let x = self.x.round() as i32;
        let y = self.y.round() as i32;
        col >= x
            && col < x + self.sprite_cols as i32
            && row >= y
            && row < y + self.sprite_rows as i32
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedPicker;
    use super::*;

    #[test]
    fn test_spawn_clamps_initial_x_into_bounds() {
        let mut picker = ScriptedPicker::new(vec![Mode::Idle]);
        let state = SpriteState::new(ScreenBounds::new(80, 24), 10, 5, &mut picker);
        assert_eq!(state.x, 70.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.vy, 0.0);
        assert!(!state.dragging);
    }

    #[test]
    fn test_ground_level_derivation() {
        let mut picker = ScriptedPicker::new(vec![Mode::Idle]);
        let mut state = SpriteState::new(ScreenBounds::new(80, 24), 10, 5, &mut picker);
        // 24 rows - 5 sprite rows - 1 margin
        assert_eq!(state.ground_y, 18.0);

        state.set_bounds(ScreenBounds::new(80, 40));
        assert_eq!(state.ground_y, 34.0);
    }

    #[test]
    fn test_hit_test_edges() {
        let mut picker = ScriptedPicker::new(vec![Mode::Idle]);
        let mut state = SpriteState::new(ScreenBounds::new(80, 24), 10, 5, &mut picker);
        state.x = 20.0;
        state.y = 10.0;
        assert!(state.hit_test(20, 10));
        assert!(state.hit_test(29, 14));
        assert!(!state.hit_test(30, 10));
        assert!(!state.hit_test(20, 15));
        assert!(!state.hit_test(19, 10));
    }

    #[test]
    fn test_uniform_picker_distribution() {
        let mut picker = UniformPicker::seeded(0xFE11A);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            match picker.pick() {
                Mode::Idle => counts[0] += 1,
                Mode::WalkLeft => counts[1] += 1,
                Mode::WalkRight => counts[2] += 1,
            }
        }
        for &count in &counts {
            assert!(
                (800..=1200).contains(&count),
                "mode counts badly skewed: {:?}",
                counts
            );
        }
    }
}
