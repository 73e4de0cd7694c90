use std::path::PathBuf;
use std::time::Duration;

/// Main behavior tick interval. 40 ms, i.e. 25 Hz — this is the literal
/// interval the physics constants are tuned against.
pub const TICK_INTERVAL_MS: u64 = 40;

/// Cadence of the drag-visual frame cycle, independent of the main tick.
pub const DRAG_FRAME_INTERVAL_MS: u64 = 100;

/// Runtime configuration, assembled from CLI flags at startup.
/// Everything else about the companion is a fixed constant.
#[derive(Debug, Clone)]
pub struct Config {
    /// Behavior tick interval
    pub tick_rate: Duration,
    /// Drag frame cycle interval
    pub drag_frame_rate: Duration,
    /// Directory holding idle.gif / left.gif / right.gif / drag.gif
    pub assets_dir: PathBuf,
    /// Log file path (logging disabled if not specified)
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(TICK_INTERVAL_MS),
            drag_frame_rate: Duration::from_millis(DRAG_FRAME_INTERVAL_MS),
            assets_dir: PathBuf::from("image"),
            log_file: None,
        }
    }
}
