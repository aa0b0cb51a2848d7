use rusttype::Font;

use crate::projector::Color;
use crate::renderer::{Surface, VisualEffect};
use crate::text::{self, blend};
use crate::torch::Torch;

fn pack(color: Color) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32
}

/// Software surface: a `0x00RRGGBB` buffer the host copies into its window.
pub struct FrameBuffer {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    font: Option<Font<'static>>,
    torch: Torch,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, font: Option<Font<'static>>, torch: Torch) -> Self {
        FrameBuffer {
            buffer: vec![0; width * height],
            width,
            height,
            font,
            torch,
        }
    }

    /// Copies into an RGBA8 frame such as `pixels::Pixels::frame_mut`.
    pub fn draw_to_buffer(&self, frame: &mut [u8]) {
        for (pixel, &color) in frame.chunks_exact_mut(4).zip(&self.buffer) {
            let rgba = [(color >> 16) as u8, (color >> 8) as u8, color as u8, 0xFF];
            pixel.copy_from_slice(&rgba);
        }
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        if x < 0 || x >= self.width as i32 {
            return;
        }
        let top = y0.max(0);
        let bottom = y1.min(self.height as i32 - 1);
        let packed = pack(color);
        for y in top..=bottom {
            self.buffer[y as usize * self.width + x as usize] = packed;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, alpha: u8) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        let packed = pack(color);

        for py in y0..y1 {
            let row = py as usize * self.width;
            for px in x0..x1 {
                let idx = row + px as usize;
                self.buffer[idx] = if alpha == 255 {
                    packed
                } else {
                    blend(self.buffer[idx], color, alpha)
                };
            }
        }
    }

    fn draw_text(&mut self, content: &str, x: i32, y: i32, size: f32, color: Color) {
        if let Some(font) = &self.font {
            text::draw_text(
                &mut self.buffer,
                self.width,
                self.height,
                font,
                content,
                (x, y),
                size,
                color,
            );
        }
    }

    fn text_width(&self, content: &str, size: f32) -> i32 {
        match &self.font {
            Some(font) => text::text_width(font, content, size),
            None => (content.chars().count() as f32 * size * 0.5) as i32,
        }
    }

    fn draw_effect(&mut self, effect: VisualEffect, x: i32, y: i32, time: f32) {
        match effect {
            VisualEffect::Torch => {
                self.torch
                    .frame(time)
                    .blit(&mut self.buffer, self.width, self.height, x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(w: usize, h: usize) -> FrameBuffer {
        FrameBuffer::new(w, h, None, Torch::procedural())
    }

    #[test]
    fn vline_is_clipped_to_the_buffer() {
        let mut fb = surface(4, 4);
        fb.draw_vline(1, -10, 10, Color::new(255, 0, 0));
        fb.draw_vline(7, 0, 3, Color::new(0, 255, 0));
        let column: Vec<u32> = (0..4).map(|y| fb.buffer[y * 4 + 1]).collect();
        assert_eq!(column, vec![0x00FF_0000; 4]);
        assert_eq!(fb.buffer.iter().filter(|&&p| p != 0).count(), 4);
    }

    #[test]
    fn translucent_rect_blends() {
        let mut fb = surface(2, 2);
        fb.fill_rect(0, 0, 2, 2, Color::new(200, 200, 200), 255);
        fb.fill_rect(-1, -1, 2, 2, Color::new(0, 0, 0), 140);
        // 200 * 115 / 255 = 90
        assert_eq!(fb.buffer[0], 0x005A_5A5A);
        assert_eq!(fb.buffer[3], 0x00C8_C8C8);
    }

    #[test]
    fn text_without_font_is_skipped_but_measured() {
        let mut fb = surface(8, 8);
        fb.draw_text("hi", 0, 0, 20.0, Color::new(255, 255, 255));
        assert!(fb.buffer.iter().all(|&p| p == 0));
        assert_eq!(fb.text_width("hi", 20.0), 20);
    }

    #[test]
    fn torch_effect_draws_opaque_flame() {
        let mut fb = surface(64, 64);
        fb.draw_effect(VisualEffect::Torch, 0, 0, 0.0);
        assert!(fb.buffer.iter().any(|&p| p == 0x00FF_A100));
    }

    #[test]
    fn rgba_frame_copy() {
        let mut fb = surface(1, 1);
        fb.fill_rect(0, 0, 1, 1, Color::new(1, 2, 3), 255);
        let mut frame = [0u8; 4];
        fb.draw_to_buffer(&mut frame);
        assert_eq!(frame, [1, 2, 3, 255]);
    }
}
