use tracing::{debug, warn};

use crate::consts::{TORCH_FPS, TORCH_FRAMES, TORCH_FRAME_HEIGHT, TORCH_FRAME_WIDTH};
use crate::projector::Color;
use crate::textures::Texture;

/// Flickering torch: a short loop of frames picked by elapsed time.
#[derive(Debug, Clone)]
pub struct Torch {
    frames: Vec<Texture>,
}

impl Torch {
    /// Loads a horizontal strip of frames from `path`, falling back to the
    /// procedural flame when the file is missing or malformed.
    pub fn load(path: &str) -> Self {
        match image::open(path) {
            Ok(img) => {
                let img = img.to_rgba8();
                let frame_width = img.width() / TORCH_FRAMES as u32;
                if frame_width == 0 {
                    warn!("torch strip {path} is narrower than {TORCH_FRAMES} pixels");
                    return Self::procedural();
                }
                debug!("torch frames loaded from {path}");
                let frames = (0..TORCH_FRAMES as u32)
                    .map(|i| Texture::from_view(&img, i * frame_width, 0, frame_width, img.height()))
                    .collect();
                Torch { frames }
            }
            Err(e) => {
                debug!("torch texture {path} not loaded ({e}), drawing procedural frames");
                Self::procedural()
            }
        }
    }

    pub fn procedural() -> Self {
        let (w, h) = (TORCH_FRAME_WIDTH, TORCH_FRAME_HEIGHT);
        let cx = (w / 2) as f32;
        let frames = (0..TORCH_FRAMES)
            .map(|i| {
                let mut frame = Texture::new(w, h);
                frame.fill_rect(w as i32 / 2 - 2, h as i32 - 14, 4, 14, Color::new(80, 60, 30));
                let k = 1.0 + 0.06 * i as f32;
                frame.fill_circle(cx, h as f32 - 18.0, 10.0 * k, Color::new(255, 161, 0));
                frame.fill_circle(cx, h as f32 - 26.0, 8.0 * k, Color::new(253, 249, 0));
                frame.fill_circle(cx, h as f32 - 34.0, 5.0 * k, Color::new(255, 203, 0));
                frame
            })
            .collect();
        Torch { frames }
    }

    pub fn frame_index(&self, time: f32) -> usize {
        (time.max(0.0) * TORCH_FPS) as usize % self.frames.len()
    }

    pub fn frame(&self, time: f32) -> &Texture {
        &self.frames[self.frame_index(time)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cycle_eight_times_a_second() {
        let torch = Torch::procedural();
        assert_eq!(torch.frame_index(0.0), 0);
        assert_eq!(torch.frame_index(0.13), 1);
        assert_eq!(torch.frame_index(0.38), 3);
        assert_eq!(torch.frame_index(0.5), 0);
    }

    #[test]
    fn procedural_frames_grow_and_keep_corners_clear() {
        let torch = Torch::procedural();
        let opaque = |t: &Texture| t.pixels.iter().filter(|&&p| p >> 24 != 0).count();
        assert!(opaque(&torch.frames[3]) > opaque(&torch.frames[0]));
        assert_eq!(torch.frames[0].pixels[0], 0);
        assert_eq!(torch.frames[0].width, TORCH_FRAME_WIDTH);
    }

    #[test]
    fn missing_strip_falls_back_to_procedural() {
        let torch = Torch::load("does/not/exist.png");
        assert_eq!(torch.frames.len(), TORCH_FRAMES);
    }
}
