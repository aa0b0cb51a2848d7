use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::audio::Volumes;
use crate::consts::{
    MOUSE_SENSITIVITY_MAX, MOUSE_SENSITIVITY_MIN, MUSIC_VOLUME, STEP_VOLUME, WIN_VOLUME,
};
use crate::player::Settings;

/// User preferences kept next to the executable. Every field is optional so
/// an old or hand-edited file still loads.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub mouse_sensitivity: Option<f32>,
    pub move_speed: Option<f32>,
    pub rot_speed: Option<f32>,
    pub fov: Option<f32>,
    pub music_volume: Option<f32>,
    pub step_volume: Option<f32>,
    pub win_volume: Option<f32>,
    /// 1-based id of the level last picked in the menu.
    pub last_level: Option<usize>,
}

impl Config {
    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();
        Settings {
            move_speed: self.move_speed.unwrap_or(defaults.move_speed),
            rot_speed: self.rot_speed.unwrap_or(defaults.rot_speed),
            mouse_sensitivity: self
                .mouse_sensitivity
                .unwrap_or(defaults.mouse_sensitivity)
                .clamp(MOUSE_SENSITIVITY_MIN, MOUSE_SENSITIVITY_MAX),
            fov: self.fov.unwrap_or(defaults.fov),
            dead_zone: defaults.dead_zone,
        }
    }

    pub fn volumes(&self) -> Volumes {
        let level = |v: Option<f32>, default: f32| v.unwrap_or(default).clamp(0.0, 1.0);
        Volumes {
            music: level(self.music_volume, MUSIC_VOLUME),
            step: level(self.step_volume, STEP_VOLUME),
            win: level(self.win_volume, WIN_VOLUME),
        }
    }
}

pub fn save_config(config: &Config, path: impl AsRef<Path>) -> Result<()> {
    let config_str = toml::to_string_pretty(config)?;
    std::fs::write(path, config_str)?;
    Ok(())
}

pub fn load_config(path: impl AsRef<Path>) -> Config {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str(&content).ok())
        .unwrap_or_default()
}
