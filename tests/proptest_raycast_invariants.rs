//! Property-based invariant tests for the grid, the ray march and movement.
//!
//! 1. Everything outside the grid is solid.
//! 2. The DDA march always stops, within `width + height` steps.
//! 3. Reported distances are finite and never below the clamp.
//! 4. Y-side shading is a truncated 0.6 scale of the base color.
//! 5. Collision never leaves the player inside a solid cell.
//! 6. Rotation keeps direction and camera plane rigid.

use glam::Vec2;
use mazecaster::consts::{EXIT_CELL, FOV, MIN_PERP_DISTANCE};
use mazecaster::player::Pose;
use mazecaster::projector::{base_color, wall_color};
use mazecaster::raycast::{Side, cast_ray};
use mazecaster::{GridMap, collision::resolve_move};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn cell_strategy() -> impl Strategy<Value = i32> {
    prop::sample::select(vec![0, 0, 0, 1, 2, 3, 4, EXIT_CELL])
}

fn grid_strategy() -> impl Strategy<Value = GridMap> {
    (1usize..=12, 1usize..=12).prop_flat_map(|(w, h)| {
        prop::collection::vec(cell_strategy(), w * h)
            .prop_map(move |cells| GridMap::from_cells("prop", w, h, cells).unwrap())
    })
}

/// Grid plus a point strictly inside it.
fn grid_and_origin() -> impl Strategy<Value = (GridMap, Vec2)> {
    grid_strategy().prop_flat_map(|map| {
        let (w, h) = (map.width() as f32, map.height() as f32);
        (Just(map), 0.0f32..w, 0.0f32..h).prop_map(|(map, x, y)| (map, Vec2::new(x, y)))
    })
}

fn direction_strategy() -> impl Strategy<Value = Vec2> {
    prop_oneof![
        (0.0f32..std::f32::consts::TAU).prop_map(|a| Vec2::new(a.cos(), a.sin())),
        prop::sample::select(vec![
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, -1.0),
        ]),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Out of bounds is solid
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn out_of_bounds_is_solid(map in grid_strategy(), x in -20i32..40, y in -20i32..40) {
        let expected = match map.get_tile(x, y) {
            None => true,
            Some(code) => code > 0 && code != EXIT_CELL,
        };
        prop_assert_eq!(map.is_solid(x, y), expected);
        if x < 0 || y < 0 || x >= map.width() as i32 || y >= map.height() as i32 {
            prop_assert!(map.is_solid(x, y));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. The march terminates with a usable distance
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn march_terminates_within_grid_span((map, origin) in grid_and_origin(), dir in direction_strategy()) {
        let hit = cast_ray(&map, origin, dir);
        let bound = (map.width() + map.height()) as u32;
        prop_assert!(hit.steps >= 1);
        prop_assert!(hit.steps <= bound, "{} steps for a {}x{} grid", hit.steps, map.width(), map.height());
        prop_assert!(hit.perp_distance.is_finite());
        prop_assert!(hit.perp_distance >= MIN_PERP_DISTANCE);
        prop_assert!(hit.wall_type > 0 && hit.wall_type != EXIT_CELL);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Shading
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn y_side_is_truncated_sixty_percent(wall_type in -2i32..12) {
        let base = base_color(wall_type);
        prop_assert_eq!(wall_color(wall_type, Side::X), base);
        let shaded = wall_color(wall_type, Side::Y);
        prop_assert_eq!(shaded.red, (base.red as f32 * 0.6) as u8);
        prop_assert_eq!(shaded.green, (base.green as f32 * 0.6) as u8);
        prop_assert_eq!(shaded.blue, (base.blue as f32 * 0.6) as u8);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Collision
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn never_ends_inside_a_wall(
        (map, origin) in grid_and_origin(),
        dx in -0.9f32..0.9,
        dy in -0.9f32..0.9,
    ) {
        prop_assume!(!map.is_solid(origin.x.floor() as i32, origin.y.floor() as i32));
        let result = resolve_move(origin, Vec2::new(dx, dy), &map);
        let p = result.position;
        prop_assert!(!map.is_solid(p.x.floor() as i32, p.y.floor() as i32));
        if !result.moved {
            prop_assert_eq!(p, origin);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Rotation rigidity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rotation_is_rigid(angles in prop::collection::vec(-3.2f32..3.2, 1..20)) {
        let pose = angles.iter().fold(Pose::spawn(FOV), |p, &a| p.rotated(a));
        prop_assert!((pose.direction.length() - 1.0).abs() < 1e-3);
        prop_assert!((pose.plane.length() - FOV).abs() < 1e-3);
        prop_assert!(pose.direction.dot(pose.plane).abs() < 1e-3);
    }
}
