//! Built-in levels. Both are 16x16, walled in, spawn at (1.5, 1.5) and exit
//! in the lower right corner.

use crate::error::MapError;
use crate::map::GridMap;

const LEVEL_SIDE: usize = 16;

#[rustfmt::skip]
const LEVEL_ONE: [i32; LEVEL_SIDE * LEVEL_SIDE] = [
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,0,0,0,0,0,0,0,0,2,0,0,0,0,0,1,
    1,0,1,1,0,1,1,1,0,2,0,1,1,1,0,1,
    1,0,1,0,0,0,0,1,0,2,0,1,0,0,0,1,
    1,0,1,0,1,1,0,1,0,2,0,1,0,1,0,1,
    1,0,0,0,0,0,0,0,0,2,0,0,0,1,0,1,
    1,0,1,1,1,1,1,1,0,2,1,1,0,1,0,1,
    1,0,1,0,0,0,0,1,0,2,0,1,0,1,0,1,
    1,0,1,0,1,1,0,1,0,2,0,1,0,1,0,1,
    1,0,0,0,0,0,0,0,0,2,0,0,0,0,0,1,
    1,0,1,1,1,1,1,1,1,2,1,1,1,1,0,1,
    1,0,0,0,0,0,0,0,0,2,0,0,0,1,0,1,
    1,0,1,1,1,1,1,1,0,2,1,1,0,1,0,1,
    1,0,0,0,0,0,0,0,0,2,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,9,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
];

#[rustfmt::skip]
const LEVEL_TWO: [i32; LEVEL_SIDE * LEVEL_SIDE] = [
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,0,0,1,0,0,0,1,0,0,0,1,0,0,0,1,
    1,0,1,1,0,1,0,1,0,1,0,1,0,1,0,1,
    1,0,1,0,0,1,0,0,0,1,0,0,0,1,0,1,
    1,0,1,0,1,1,1,1,0,1,1,1,0,1,0,1,
    1,0,0,0,0,0,0,1,0,0,0,1,0,0,0,1,
    1,1,1,1,1,1,0,1,1,1,0,1,1,1,0,1,
    1,0,0,0,0,1,0,0,0,1,0,0,0,1,0,1,
    1,0,1,1,0,1,1,1,0,1,1,1,0,1,0,1,
    1,0,1,0,0,0,0,1,0,0,0,1,0,1,0,1,
    1,0,1,0,1,1,0,1,0,1,0,1,0,1,0,1,
    1,0,0,0,0,0,0,1,0,0,0,1,0,0,0,1,
    1,1,1,1,1,1,0,1,1,1,0,1,1,1,0,1,
    1,0,0,0,0,0,0,1,0,0,0,1,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,9,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
];

pub fn level_one() -> Result<GridMap, MapError> {
    GridMap::from_cells("Level 1", LEVEL_SIDE, LEVEL_SIDE, LEVEL_ONE.to_vec())
}

pub fn level_two() -> Result<GridMap, MapError> {
    GridMap::from_cells("Level 2", LEVEL_SIDE, LEVEL_SIDE, LEVEL_TWO.to_vec())
}

pub fn builtin() -> Result<Vec<GridMap>, MapError> {
    Ok(vec![level_one()?, level_two()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPAWN_POSITION;

    #[test]
    fn builtin_levels_have_walkable_spawn_and_one_exit() {
        for level in builtin().unwrap() {
            let sx = SPAWN_POSITION.x.floor() as i32;
            let sy = SPAWN_POSITION.y.floor() as i32;
            assert!(!level.is_solid(sx, sy), "{} spawn is blocked", level.name());
            let exits = level.cells().iter().filter(|&&c| c == 9).count();
            assert_eq!(exits, 1, "{} should have exactly one exit", level.name());
            assert!(level.is_exit(14, 14));
        }
    }

    #[test]
    fn builtin_levels_are_walled_in() {
        for level in builtin().unwrap() {
            let (w, h) = (level.width() as i32, level.height() as i32);
            for x in 0..w {
                assert!(level.is_solid(x, 0) && level.is_solid(x, h - 1));
            }
            for y in 0..h {
                assert!(level.is_solid(0, y) && level.is_solid(w - 1, y));
            }
        }
    }
}
