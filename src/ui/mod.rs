use image::RgbaImage;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

use crate::app::App;

/// Pixels below this alpha are treated as transparent, letting the terminal
/// background show through (the "transparent window" of the companion).
const ALPHA_VISIBLE: u8 = 8;

/// Top-level draw function — footer first, then the sprite on top
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let buf = f.buffer_mut();

    if area.height > 0 {
        buf.set_string(
            area.left(),
            area.bottom() - 1,
            " q quit · drag with the mouse",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        );
    }

    if let Some(frame) = app.host.frame() {
        let (x, y) = app.host.position();
        render_sprite(frame, x, y, area, buf);
    }
}

/// Composite an RGBA frame into the buffer at cell origin (ox, oy) using
/// half blocks: each terminal cell covers one pixel column and two pixel
/// rows (top pixel on the upper half, bottom pixel on the lower half).
/// Anything outside `area` is clipped, including negative origins reached
/// while dragging.
pub(crate) fn render_sprite(img: &RgbaImage, ox: i32, oy: i32, area: Rect, buf: &mut Buffer) {
    let (width, height) = img.dimensions();
    for cell_row in 0..height.div_ceil(2) {
        let sy = oy + cell_row as i32;
        if sy < area.top() as i32 || sy >= area.bottom() as i32 {
            continue;
        }
        for col in 0..width {
            let sx = ox + col as i32;
            if sx < area.left() as i32 || sx >= area.right() as i32 {
                continue;
            }

            let top = visible_pixel(img, col, cell_row * 2);
            let bottom = visible_pixel(img, col, cell_row * 2 + 1);
            let Some(cell) = buf.cell_mut((sx as u16, sy as u16)) else {
                continue;
            };
            match (top, bottom) {
                (Some(t), Some(b)) => {
                    cell.set_symbol("▀").set_fg(t).set_bg(b);
                }
                (Some(t), None) => {
                    cell.set_symbol("▀").set_fg(t);
                }
                (None, Some(b)) => {
                    cell.set_symbol("▄").set_fg(b);
                }
                (None, None) => {}
            }
        }
    }
}

fn visible_pixel(img: &RgbaImage, x: u32, y: u32) -> Option<Color> {
    if y >= img.height() {
        return None;
    }
    let px = img.get_pixel(x, y).0;
    if px[3] < ALPHA_VISIBLE {
        return None;
    }
    Some(Color::Rgb(px[0], px[1], px[2]))
}
