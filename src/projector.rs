use palette::Srgb;

use crate::consts::SHADE_FACTOR;
use crate::raycast::{RayHit, Side};

pub type Color = Srgb<u8>;

/// One vertical wall slice: column `x`, rows `top..=bottom`. Rows may lie
/// outside the viewport when the wall is very close; the surface clips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallStrip {
    pub x: i32,
    pub top: i32,
    pub bottom: i32,
    pub color: Color,
}

pub fn base_color(wall_type: i32) -> Color {
    match wall_type {
        1 => Color::new(220, 80, 80),
        2 => Color::new(80, 220, 80),
        3 => Color::new(80, 80, 220),
        4 => Color::new(220, 180, 60),
        _ => Color::new(200, 200, 200),
    }
}

/// Darkens each channel by `SHADE_FACTOR`, truncating.
pub fn shade(color: Color) -> Color {
    let scale = |c: u8| (c as f32 * SHADE_FACTOR) as u8;
    Color::new(scale(color.red), scale(color.green), scale(color.blue))
}

pub fn wall_color(wall_type: i32, side: Side) -> Color {
    let color = base_color(wall_type);
    match side {
        Side::X => color,
        Side::Y => shade(color),
    }
}

pub fn project(x: usize, hit: &RayHit, viewport_height: usize) -> WallStrip {
    let h = viewport_height as i32;
    let line_height = (viewport_height as f32 / hit.perp_distance) as i32;
    WallStrip {
        x: x as i32,
        top: h / 2 - line_height / 2,
        bottom: h / 2 + line_height / 2,
        color: wall_color(hit.wall_type, hit.side),
    }
}

pub fn project_view(hits: &[RayHit], viewport_height: usize) -> Vec<WallStrip> {
    hits.iter()
        .enumerate()
        .map(|(x, hit)| project(x, hit, viewport_height))
        .collect()
}
