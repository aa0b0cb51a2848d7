use glam::Vec2;

use crate::map::GridMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub position: Vec2,
    /// True when at least one axis with a non-zero displacement was accepted.
    pub moved: bool,
}

/// Moves `position` by `d`, one axis at a time. X is tried first against the
/// current row; Y is then tried against the column reached after the X step,
/// so a blocked axis slides along the wall instead of stopping.
pub fn resolve_move(position: Vec2, d: Vec2, map: &GridMap) -> MoveResult {
    let mut p = position;
    let mut moved = false;

    let nx = p.x + d.x;
    if !map.is_solid(nx.floor() as i32, p.y.floor() as i32) {
        p.x = nx;
        moved |= d.x != 0.0;
    }

    let ny = p.y + d.y;
    if !map.is_solid(p.x.floor() as i32, ny.floor() as i32) {
        p.y = ny;
        moved |= d.y != 0.0;
    }

    MoveResult { position: p, moved }
}
