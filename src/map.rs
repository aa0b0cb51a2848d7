use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::consts::{EXIT_CELL, MAPS_DIR};
use crate::error::MapError;
use crate::levels;

/// Static, row-major grid of cell codes.
///
/// `0` is walkable floor, `9` is the walkable exit, any other positive code
/// is a solid wall whose value only picks a shading color. Everything
/// outside `[0, width) x [0, height)` counts as solid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    name: String,
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

/// On-disk layout of a level, `maps/<name>.toml`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MapFile {
    pub name: Option<String>,
    pub map: Vec<Vec<i32>>,
}

impl GridMap {
    pub fn from_cells(
        name: impl Into<String>,
        width: usize,
        height: usize,
        cells: Vec<i32>,
    ) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::EmptyDimensions { width, height });
        }
        if cells.len() != width * height {
            return Err(MapError::LengthMismatch {
                width,
                height,
                len: cells.len(),
            });
        }
        Ok(GridMap {
            name: name.into(),
            width,
            height,
            cells,
        })
    }

    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<i32>>) -> Result<Self, MapError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }
        Self::from_cells(name, width, height, cells)
    }

    pub fn parse_from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: MapFile = toml::from_str(&contents).map_err(|source| MapError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let map = Self::from_rows(file.name.unwrap_or(fallback), file.map)?;
        info!(path = %path.display(), width = map.width, height = map.height, "loaded map");
        Ok(map)
    }

    /// Loads `maps/<name>.toml`.
    pub fn load_named(name: &str) -> Result<Self, MapError> {
        Self::parse_from_file(Path::new(MAPS_DIR).join(format!("{name}.toml")))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Raw code at `(x, y)`. Callers guarantee the coordinate is in bounds.
    pub fn cell_at(&self, x: i32, y: i32) -> i32 {
        debug_assert!(self.in_bounds(x, y), "cell ({x}, {y}) out of bounds");
        self.cells[y as usize * self.width + x as usize]
    }

    pub fn get_tile(&self, x: i32, y: i32) -> Option<i32> {
        self.in_bounds(x, y).then(|| self.cell_at(x, y))
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        match self.get_tile(x, y) {
            None => true,
            Some(code) => code > 0 && code != EXIT_CELL,
        }
    }

    pub fn is_exit(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y) == Some(EXIT_CELL)
    }
}

/// The ordered levels a session walks through. When `chained`, reaching the
/// exit of level `i` continues on level `i + 1`; otherwise every level ends
/// the game.
#[derive(Debug, Clone)]
pub struct LevelSet {
    levels: Vec<Arc<GridMap>>,
    chained: bool,
}

impl LevelSet {
    pub fn new(levels: Vec<GridMap>, chained: bool) -> Result<Self, MapError> {
        if levels.is_empty() {
            return Err(MapError::NoLevels);
        }
        debug!(count = levels.len(), chained, "level set ready");
        Ok(LevelSet {
            levels: levels.into_iter().map(Arc::new).collect(),
            chained,
        })
    }

    pub fn single(map: GridMap) -> Self {
        LevelSet {
            levels: vec![Arc::new(map)],
            chained: false,
        }
    }

    pub fn builtin(chained: bool) -> Result<Self, MapError> {
        Self::new(levels::builtin()?, chained)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn is_chained(&self) -> bool {
        self.chained
    }

    pub fn get(&self, index: usize) -> Option<&Arc<GridMap>> {
        self.levels.get(index)
    }

    /// Index of the level that follows `index`, if the set is chained and
    /// one remains.
    pub fn next_after(&self, index: usize) -> Option<usize> {
        (self.chained && index + 1 < self.levels.len()).then_some(index + 1)
    }

    /// Resolves a 1-based level id as typed by the player.
    pub fn index_of_id(&self, id: usize) -> Result<usize, MapError> {
        if id >= 1 && id <= self.levels.len() {
            Ok(id - 1)
        } else {
            Err(MapError::UnknownLevel(id))
        }
    }
}
