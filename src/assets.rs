use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};
use tracing::info;

use crate::error::{FellaError, FellaResult};
use crate::pet::Mode;

/// An ordered, immutable run of decoded frames. Index `i` maps to the same
/// image for the whole process lifetime.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    frames: Vec<Arc<RgbaImage>>,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at `index`; callers keep `index` in bounds via modulo wrap.
    pub fn frame(&self, index: usize) -> Arc<RgbaImage> {
        Arc::clone(&self.frames[index])
    }
}

/// The four frame sequences the companion can display, loaded once at
/// startup and read-only thereafter.
#[derive(Debug, Clone)]
pub struct FrameStore {
    idle: FrameSequence,
    walk_left: FrameSequence,
    walk_right: FrameSequence,
    drag: FrameSequence,
    width: u32,
    height: u32,
}

impl FrameStore {
    /// Load `idle.gif`, `left.gif`, `right.gif` and `drag.gif` from `dir`,
    /// decoding every frame eagerly. Any missing, undecodable or empty
    /// resource is fatal; there is no partial-asset fallback. All frames
    /// must share one pixel size — the sprite's footprint is a single
    /// constant for the physics.
    pub fn load(dir: &Path) -> FellaResult<Self> {
        let idle = load_sequence(&dir.join("idle.gif"))?;
        let walk_left = load_sequence(&dir.join("left.gif"))?;
        let walk_right = load_sequence(&dir.join("right.gif"))?;
        let drag = load_sequence(&dir.join("drag.gif"))?;

        let first = idle.frames[0].dimensions();
        for seq in [&idle, &walk_left, &walk_right, &drag] {
            for frame in &seq.frames {
                if frame.dimensions() != first {
                    return Err(FellaError::Asset(format!(
                        "frame size mismatch: expected {}x{}, found {}x{}",
                        first.0,
                        first.1,
                        frame.dimensions().0,
                        frame.dimensions().1
                    )));
                }
            }
        }

        info!(
            idle = idle.len(),
            walk_left = walk_left.len(),
            walk_right = walk_right.len(),
            drag = drag.len(),
            width = first.0,
            height = first.1,
            "frames loaded"
        );

        Ok(Self {
            idle,
            walk_left,
            walk_right,
            drag,
            width: first.0,
            height: first.1,
        })
    }

    /// The sequence displayed while the given behavior mode is active.
    pub fn sequence(&self, mode: Mode) -> &FrameSequence {
        match mode {
            Mode::Idle => &self.idle,
            Mode::WalkLeft => &self.walk_left,
            Mode::WalkRight => &self.walk_right,
        }
    }

    /// The sequence displayed while the sprite is being dragged.
    pub fn drag_sequence(&self) -> &FrameSequence {
        &self.drag
    }

    /// Sprite width in terminal columns (one image column per cell).
    pub fn cols(&self) -> u32 {
        self.width
    }

    /// Sprite height in terminal rows (two image rows per half-block cell).
    pub fn rows(&self) -> u32 {
        self.height.div_ceil(2)
    }

    /// Build a store straight from frame buffers. Test seam; production code
    /// always goes through `load`.
    #[cfg(test)]
    pub(crate) fn from_frames(
        idle: Vec<RgbaImage>,
        walk_left: Vec<RgbaImage>,
        walk_right: Vec<RgbaImage>,
        drag: Vec<RgbaImage>,
    ) -> Self {
        let (width, height) = idle[0].dimensions();
        let wrap = |frames: Vec<RgbaImage>| FrameSequence {
            frames: frames.into_iter().map(Arc::new).collect(),
        };
        Self {
            idle: wrap(idle),
            walk_left: wrap(walk_left),
            walk_right: wrap(walk_right),
            drag: wrap(drag),
            width,
            height,
        }
    }
}

fn load_sequence(path: &Path) -> FellaResult<FrameSequence> {
    let file = File::open(path).map_err(|e| {
        FellaError::Asset(format!("cannot open {}: {}", path.display(), e))
    })?;
    let decoder = GifDecoder::new(BufReader::new(file))?;
    let frames: Vec<Arc<RgbaImage>> = decoder
        .into_frames()
        .collect_frames()?
        .into_iter()
        .map(|frame| Arc::new(frame.into_buffer()))
        .collect();
    if frames.is_empty() {
        return Err(FellaError::Asset(format!(
            "{} decoded to zero frames",
            path.display()
        )));
    }
    Ok(FrameSequence { frames })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Frame, Rgba};
    use std::fs;
    use std::path::PathBuf;

    fn solid(w: u32, h: u32, px: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(px))
    }

    fn write_gif(path: &Path, frames: Vec<RgbaImage>) {
        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        encoder
            .encode_frames(frames.into_iter().map(Frame::new))
            .unwrap();
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fella-assets-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_all_sequences() {
        let dir = temp_dir("ok");
        write_gif(
            &dir.join("idle.gif"),
            vec![solid(4, 6, [255, 0, 0, 255]), solid(4, 6, [0, 255, 0, 255])],
        );
        write_gif(&dir.join("left.gif"), vec![solid(4, 6, [0, 0, 255, 255])]);
        write_gif(&dir.join("right.gif"), vec![solid(4, 6, [255, 255, 0, 255])]);
        write_gif(&dir.join("drag.gif"), vec![solid(4, 6, [255, 0, 255, 255])]);

        let store = FrameStore::load(&dir).unwrap();
        assert_eq!(store.sequence(Mode::Idle).len(), 2);
        assert_eq!(store.sequence(Mode::WalkLeft).len(), 1);
        assert_eq!(store.sequence(Mode::WalkRight).len(), 1);
        assert_eq!(store.drag_sequence().len(), 1);
        assert_eq!(store.cols(), 4);
        assert_eq!(store.rows(), 3);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_resource_is_fatal() {
        let dir = temp_dir("missing");
        // No idle.gif at all
        let err = FrameStore::load(&dir).unwrap_err();
        assert!(matches!(err, FellaError::Asset(_)));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let dir = temp_dir("mismatch");
        write_gif(&dir.join("idle.gif"), vec![solid(4, 6, [255, 0, 0, 255])]);
        write_gif(&dir.join("left.gif"), vec![solid(8, 6, [0, 255, 0, 255])]);
        write_gif(&dir.join("right.gif"), vec![solid(4, 6, [0, 0, 255, 255])]);
        write_gif(&dir.join("drag.gif"), vec![solid(4, 6, [255, 0, 255, 255])]);

        let err = FrameStore::load(&dir).unwrap_err();
        assert!(matches!(err, FellaError::Asset(_)));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_odd_height_rounds_up_to_a_full_row() {
        let store = FrameStore::from_frames(
            vec![solid(3, 5, [1, 2, 3, 255])],
            vec![solid(3, 5, [1, 2, 3, 255])],
            vec![solid(3, 5, [1, 2, 3, 255])],
            vec![solid(3, 5, [1, 2, 3, 255])],
        );
        assert_eq!(store.rows(), 3);
    }
}
