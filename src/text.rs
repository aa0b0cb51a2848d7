use rusttype::{Font, Scale, point};
use std::fs;
use tracing::warn;

use crate::projector::Color;

pub fn load_font(path: &str) -> Option<Font<'static>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("font {path} unavailable, text disabled: {e}");
            return None;
        }
    };
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        warn!("font {path} could not be parsed, text disabled");
    }
    font
}

pub fn text_width(font: &Font, text: &str, size: f32) -> i32 {
    let scale = Scale::uniform(size);
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
        .ceil() as i32
}

/// Rasterizes `text` with its top-left corner at `(x, y)`, alpha-blending
/// glyph coverage over a `0x00RRGGBB` buffer.
pub fn draw_text(
    buffer: &mut [u32],
    width: usize,
    height: usize,
    font: &Font,
    text: &str,
    (x, y): (i32, i32),
    size: f32,
    color: Color,
) {
    let scale = Scale::uniform(size);
    let v_metrics = font.v_metrics(scale);
    let layout = font.layout(text, scale, point(x as f32, y as f32 + v_metrics.ascent));

    for g in layout {
        let Some(bb) = g.pixel_bounding_box() else {
            continue;
        };
        g.draw(|gx, gy, gv| {
            let gx = gx as i32 + bb.min.x;
            let gy = gy as i32 + bb.min.y;
            if gx < 0 || gy < 0 || gx >= width as i32 || gy >= height as i32 {
                return;
            }
            let idx = gy as usize * width + gx as usize;
            let alpha = (gv.clamp(0.0, 1.0) * 255.0) as u8;
            buffer[idx] = blend(buffer[idx], color, alpha);
        });
    }
}

/// Mixes `color` over a packed `0x00RRGGBB` pixel.
pub fn blend(dst: u32, color: Color, alpha: u8) -> u32 {
    let a = alpha as u32;
    let mix = |src: u8, shift: u32| {
        let bg = (dst >> shift) & 0xFF;
        (src as u32 * a + bg * (255 - a)) / 255
    };
    (mix(color.red, 16) << 16) | (mix(color.green, 8) << 8) | mix(color.blue, 0)
}
