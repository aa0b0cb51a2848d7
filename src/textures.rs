use image::{GenericImageView, RgbaImage};

use crate::projector::Color;
use crate::text::blend;

/// RGBA pixels packed as `0xAARRGGBB`.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Texture {
    pub fn new(width: u32, height: u32) -> Self {
        Texture {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    /// Copies a `width x height` window starting at `(x, y)`.
    pub fn from_view(img: &RgbaImage, x: u32, y: u32, width: u32, height: u32) -> Self {
        let view = img.view(x, y, width, height);
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y_px in 0..height {
            for x_px in 0..width {
                let pixel = view.get_pixel(x_px, y_px);
                pixels.push(
                    ((pixel[3] as u32) << 24)
                        | ((pixel[0] as u32) << 16)
                        | ((pixel[1] as u32) << 8)
                        | (pixel[2] as u32),
                );
            }
        }
        Texture {
            width,
            height,
            pixels,
        }
    }

    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = 0xFF00_0000
            | ((color.red as u32) << 16)
            | ((color.green as u32) << 8)
            | color.blue as u32;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for py in y..y + h {
            for px in x..x + w {
                self.set(px, py, color);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let r2 = radius * radius;
        for py in 0..self.height as i32 {
            for px in 0..self.width as i32 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.set(px, py, color);
                }
            }
        }
    }

    /// Draws onto a `0x00RRGGBB` buffer at `(x, y)`, honoring alpha.
    pub fn blit(&self, buffer: &mut [u32], buf_width: usize, buf_height: usize, x: i32, y: i32) {
        for ty in 0..self.height as i32 {
            let dy = y + ty;
            if dy < 0 || dy >= buf_height as i32 {
                continue;
            }
            for tx in 0..self.width as i32 {
                let dx = x + tx;
                if dx < 0 || dx >= buf_width as i32 {
                    continue;
                }
                let texel = self.pixels[(ty as u32 * self.width + tx as u32) as usize];
                let alpha = (texel >> 24) as u8;
                if alpha == 0 {
                    continue;
                }
                let color = Color::new((texel >> 16) as u8, (texel >> 8) as u8, texel as u8);
                let idx = dy as usize * buf_width + dx as usize;
                buffer[idx] = blend(buffer[idx], color, alpha);
            }
        }
    }
}
