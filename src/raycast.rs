use glam::Vec2;
use rayon::prelude::*;

use crate::consts::{BOUNDARY_WALL_TYPE, DEGENERATE_RAY_DELTA, MIN_PERP_DISTANCE};
use crate::map::GridMap;
use crate::player::Pose;

/// Which kind of grid line the ray crossed when it hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical grid line (stepped along X).
    X,
    /// Crossed a horizontal grid line (stepped along Y). Drawn darker.
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the camera's forward axis, never below
    /// `MIN_PERP_DISTANCE`.
    pub perp_distance: f32,
    pub side: Side,
    /// Code of the hit cell, `BOUNDARY_WALL_TYPE` when the ray left the grid.
    pub wall_type: i32,
    /// Number of cells the march stepped through.
    pub steps: u32,
}

/// Camera-space offset of screen column `x`, in `[-1, 1)`.
pub fn camera_x(x: usize, width: usize) -> f32 {
    2.0 * x as f32 / width as f32 - 1.0
}

/// DDA march from `origin` along `ray_dir` until a solid cell or the edge of
/// the grid.
pub fn cast_ray(map: &GridMap, origin: Vec2, ray_dir: Vec2) -> RayHit {
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    let delta_dist_x = if ray_dir.x == 0.0 {
        DEGENERATE_RAY_DELTA
    } else {
        (1.0 / ray_dir.x).abs()
    };
    let delta_dist_y = if ray_dir.y == 0.0 {
        DEGENERATE_RAY_DELTA
    } else {
        (1.0 / ray_dir.y).abs()
    };

    let (step_x, mut side_dist_x) = if ray_dir.x < 0.0 {
        (-1, (origin.x - map_x as f32) * delta_dist_x)
    } else {
        (1, (map_x as f32 + 1.0 - origin.x) * delta_dist_x)
    };
    let (step_y, mut side_dist_y) = if ray_dir.y < 0.0 {
        (-1, (origin.y - map_y as f32) * delta_dist_y)
    } else {
        (1, (map_y as f32 + 1.0 - origin.y) * delta_dist_y)
    };

    let mut steps = 0;
    loop {
        let side = if side_dist_x < side_dist_y {
            side_dist_x += delta_dist_x;
            map_x += step_x;
            Side::X
        } else {
            side_dist_y += delta_dist_y;
            map_y += step_y;
            Side::Y
        };
        steps += 1;

        let wall_type = match map.get_tile(map_x, map_y) {
            None => Some(BOUNDARY_WALL_TYPE),
            Some(_) if map.is_solid(map_x, map_y) => Some(map.cell_at(map_x, map_y)),
            Some(_) => None,
        };

        if let Some(wall_type) = wall_type {
            let distance = match side {
                Side::X => side_dist_x - delta_dist_x,
                Side::Y => side_dist_y - delta_dist_y,
            };
            return RayHit {
                perp_distance: distance.max(MIN_PERP_DISTANCE),
                side,
                wall_type,
                steps,
            };
        }
    }
}

/// Casts one ray per screen column. Columns are independent, so they are
/// marched in parallel and collected back in column order.
pub fn cast_view(map: &GridMap, pose: &Pose, width: usize) -> Vec<RayHit> {
    (0..width)
        .into_par_iter()
        .map(|x| cast_ray(map, pose.position, pose.ray_direction(camera_x(x, width))))
        .collect()
}
