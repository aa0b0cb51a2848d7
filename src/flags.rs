use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::consts::{DEFAULT_RANDOM_MAP_SIDE, RANDOM_MAP_SIDE_MAX, RANDOM_MAP_SIDE_MIN};
use crate::error::{FlagError, MapError};
use crate::map::{GridMap, LevelSet};
use crate::maze_gen;

#[derive(Debug, Clone, PartialEq)]
pub enum MapChoice {
    /// Built-in levels; `Some(id)` preselects a 1-based level in the menu.
    Builtin(Option<usize>),
    /// `maps/<name>.toml`, played as a single level.
    Named(String),
    /// Generated maze with the given side length.
    Random(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flags {
    pub map: MapChoice,
    pub chained: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            map: MapChoice::Builtin(None),
            chained: true,
        }
    }
}

impl Flags {
    pub fn load_levels(&self) -> Result<LevelSet, MapError> {
        match &self.map {
            MapChoice::Builtin(id) => {
                let levels = LevelSet::builtin(self.chained)?;
                if let Some(id) = id {
                    levels.index_of_id(*id)?;
                }
                Ok(levels)
            }
            MapChoice::Named(name) => Ok(LevelSet::single(GridMap::load_named(name)?)),
            MapChoice::Random(side) => {
                info!(side, "generating random maze");
                let mut rng = StdRng::from_os_rng();
                Ok(LevelSet::single(maze_gen::generate(*side, &mut rng)?))
            }
        }
    }

    /// Only built-in level ids mean the same thing on the next run.
    pub fn persists_selection(&self) -> bool {
        matches!(self.map, MapChoice::Builtin(_))
    }

    /// Menu start level: the command line id, else the saved one for
    /// built-in runs.
    pub fn initial_level(&self, saved: Option<usize>) -> Option<usize> {
        match self.map {
            MapChoice::Builtin(id) => id.or(saved),
            _ => None,
        }
    }
}

/// Parses command line arguments, skipping the program name.
pub fn parse_flags<I>(args: I) -> Result<Flags, FlagError>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().skip(1).collect();
    let mut flags = Flags::default();
    let mut specific_map = false;
    let mut random_map = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-m" | "--map" => {
                let value = args.get(i + 1).ok_or(FlagError::MissingValue("--map"))?;
                specific_map = true;
                flags.map = match value.parse::<usize>() {
                    Ok(id) if id > 0 => MapChoice::Builtin(Some(id)),
                    _ => MapChoice::Named(value.clone()),
                };
                i += 2;
            }
            "-rm" | "--random-map" => {
                random_map = true;
                let mut side = DEFAULT_RANDOM_MAP_SIDE;
                if let Some(value) = args.get(i + 1).filter(|v| !v.starts_with('-')) {
                    side = value
                        .parse::<usize>()
                        .map_err(|_| FlagError::InvalidSide(value.clone()))?;
                    if !(RANDOM_MAP_SIDE_MIN..=RANDOM_MAP_SIDE_MAX).contains(&side) {
                        return Err(FlagError::SideOutOfRange(side));
                    }
                    i += 1;
                }
                flags.map = MapChoice::Random(side);
                i += 1;
            }
            "-nc" | "--no-chain" => {
                flags.chained = false;
                i += 1;
            }
            other => return Err(FlagError::Unknown(other.to_string())),
        }
    }

    if random_map && specific_map {
        return Err(FlagError::ConflictingMaps);
    }
    Ok(flags)
}
