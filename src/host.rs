use std::sync::Arc;

use image::RgbaImage;

/// The surface the companion lives on. The core publishes position and frame
/// changes through this seam; it never draws anything itself. Both calls are
/// synchronous and infallible.
pub trait RenderHost {
    /// Move the sprite's top-left to (x, y) in cells. Coordinates may be
    /// negative while the sprite is dragged off-screen; the host clips.
    fn reposition(&mut self, x: i32, y: i32);

    /// Swap the displayed image.
    fn set_frame(&mut self, frame: Arc<RgbaImage>);
}

/// Terminal implementation: retains the latest position and frame for the
/// renderer to composite on the next draw.
#[derive(Debug, Default)]
pub struct TerminalHost {
    pos: (i32, i32),
    frame: Option<Arc<RgbaImage>>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> (i32, i32) {
        self.pos
    }

    pub fn frame(&self) -> Option<&Arc<RgbaImage>> {
        self.frame.as_ref()
    }
}

impl RenderHost for TerminalHost {
    fn reposition(&mut self, x: i32, y: i32) {
        self.pos = (x, y);
    }

    fn set_frame(&mut self, frame: Arc<RgbaImage>) {
        self.frame = Some(frame);
    }
}
