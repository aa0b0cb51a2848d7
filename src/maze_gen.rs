use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;
use tracing::debug;

use crate::consts::{
    EXIT_CELL, RANDOM_MAP_HOLE_CHANCE, RANDOM_MAP_PATH_DEVIATION_CHANCE, RANDOM_MAP_SIDE_MAX,
    RANDOM_MAP_SIDE_MIN,
};
use crate::error::MapError;
use crate::map::GridMap;

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Square working grid used while carving.
struct Grid {
    side: usize,
    cells: Vec<i32>,
}

impl Grid {
    fn get(&self, x: i32, y: i32) -> Option<i32> {
        if x < 0 || y < 0 || x as usize >= self.side || y as usize >= self.side {
            return None;
        }
        Some(self.cells[y as usize * self.side + x as usize])
    }

    fn set(&mut self, (x, y): (usize, usize), code: i32) {
        self.cells[y * self.side + x] = code;
    }

    /// True if every neighbor of `tile` except `came_from` is a wall.
    fn surrounded_by_walls(&self, tile: (usize, usize), came_from: (usize, usize)) -> bool {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = tile.0 as i32 + dx;
                let ny = tile.1 as i32 + dy;
                if nx == came_from.0 as i32 && ny == came_from.1 as i32 {
                    continue;
                }
                if self.get(nx, ny) == Some(0) {
                    return false;
                }
            }
        }
        true
    }

    fn carve(&mut self, tile: (usize, usize), prev: Option<(i32, i32)>, rng: &mut impl Rng) {
        self.set(tile, 0);
        let mut directions = DIRECTIONS.to_vec();
        directions.shuffle(rng);
        // Mostly keep going straight so corridors run long.
        if let Some(prev) = prev {
            if rng.random_range(0..100) >= RANDOM_MAP_PATH_DEVIATION_CHANCE {
                directions.retain(|&d| d != prev);
                directions.insert(0, prev);
            }
        }

        for (dx, dy) in directions {
            let nx = tile.0 as i32 + dx;
            let ny = tile.1 as i32 + dy;
            // the outer ring stays solid
            if nx < 1 || ny < 1 || nx as usize >= self.side - 1 || ny as usize >= self.side - 1 {
                continue;
            }
            if self.get(nx, ny) == Some(0) {
                continue;
            }
            let next = (nx as usize, ny as usize);
            if self.surrounded_by_walls(next, tile)
                || rng.random_range(0..100) < RANDOM_MAP_HOLE_CHANCE
            {
                self.carve(next, Some((dx, dy)), rng);
            }
        }
    }

    /// Open cell with the longest walk from `start`.
    fn farthest_from(&self, start: (usize, usize)) -> (usize, usize) {
        let mut distance = vec![usize::MAX; self.cells.len()];
        let mut queue = VecDeque::from([start]);
        distance[start.1 * self.side + start.0] = 0;
        let mut farthest = start;

        while let Some((x, y)) = queue.pop_front() {
            let d = distance[y * self.side + x];
            if d > distance[farthest.1 * self.side + farthest.0] {
                farthest = (x, y);
            }
            for (dx, dy) in DIRECTIONS {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if self.get(nx, ny) != Some(0) {
                    continue;
                }
                let idx = ny as usize * self.side + nx as usize;
                if distance[idx] == usize::MAX {
                    distance[idx] = d + 1;
                    queue.push_back((nx as usize, ny as usize));
                }
            }
        }
        farthest
    }
}

/// Generates a `side x side` maze with the spawn cell `(1, 1)` open, a solid
/// outer ring, and the exit on the open cell farthest from the spawn.
pub fn generate(side: usize, rng: &mut impl Rng) -> Result<GridMap, MapError> {
    if !(RANDOM_MAP_SIDE_MIN..=RANDOM_MAP_SIDE_MAX).contains(&side) {
        return Err(MapError::RandomSize(side));
    }
    let cells = (0..side * side).map(|_| rng.random_range(1..=4)).collect();
    let mut grid = Grid { side, cells };

    grid.carve((1, 1), None, rng);
    let exit = grid.farthest_from((1, 1));
    grid.set(exit, EXIT_CELL);
    debug!(side, exit_x = exit.0, exit_y = exit.1, "random maze carved");

    GridMap::from_cells(format!("Random {side}x{side}"), side, side, grid.cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn maze(side: usize, seed: u64) -> GridMap {
        generate(side, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    fn reachable_exit(map: &GridMap) -> bool {
        let mut seen = vec![false; map.width() * map.height()];
        let mut stack = vec![(1i32, 1i32)];
        while let Some((x, y)) = stack.pop() {
            if map.is_solid(x, y) || seen[y as usize * map.width() + x as usize] {
                continue;
            }
            if map.is_exit(x, y) {
                return true;
            }
            seen[y as usize * map.width() + x as usize] = true;
            for (dx, dy) in DIRECTIONS {
                stack.push((x + dx, y + dy));
            }
        }
        false
    }

    #[test]
    fn outer_ring_stays_solid() {
        for seed in 0..8 {
            let map = maze(11, seed);
            for i in 0..11 {
                assert!(map.is_solid(i, 0) && map.is_solid(i, 10));
                assert!(map.is_solid(0, i) && map.is_solid(10, i));
            }
        }
    }

    #[test]
    fn exactly_one_exit_reachable_from_spawn() {
        for seed in 0..16 {
            let map = maze(15, seed);
            assert_eq!(map.cells().iter().filter(|&&c| c == EXIT_CELL).count(), 1);
            assert!(!map.is_solid(1, 1));
            assert!(reachable_exit(&map), "seed {seed}");
        }
    }

    #[test]
    fn wall_types_stay_in_palette() {
        let map = maze(9, 3);
        assert!(map.cells().iter().all(|&c| c == 0 || c == EXIT_CELL || (1..=4).contains(&c)));
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(maze(13, 42), maze(13, 42));
    }

    #[test]
    fn side_out_of_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(generate(4, &mut rng), Err(MapError::RandomSize(4))));
        assert!(matches!(generate(36, &mut rng), Err(MapError::RandomSize(36))));
    }
}
