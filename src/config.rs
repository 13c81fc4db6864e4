//! JSON configuration
//!
//! Every field has a default, so a config file only needs the values it
//! wants to change:
//!
//! ```json
//! { "runner": { "lives": 5, "scroll_speed": 300.0 } }
//! ```

use crate::error::ConfigError;
use crate::timer::DEFAULT_MAX_STEP;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub assets: AssetConfig,
    pub go: GoConfig,
    pub runner: RunnerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest simulation step in seconds.
    pub max_step: f64,
    pub show_outlines: bool,
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_step: DEFAULT_MAX_STEP,
            show_outlines: false,
            target_fps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory that `./img/...` ids are resolved against.
    pub root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            root: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    /// Draw the green cell overlay.
    pub show_grid: bool,
}

impl Default for GoConfig {
    fn default() -> Self {
        GoConfig {
            surface_width: 800,
            surface_height: 800,
            show_grid: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub surface_width: u32,
    pub surface_height: u32,
    /// Leftward platform speed in px/s while running.
    pub scroll_speed: f64,
    /// Distance a platform jumps right once it is fully off-screen.
    pub world_length: f64,
    pub jump_height: f64,
    pub lives: u32,
    pub unicorn_x: f64,
    /// Fixed layout, repeated every `world_length`. The unicorn starts on
    /// the first platform.
    pub platforms: Vec<PlatformSpec>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            surface_width: 1200,
            surface_height: 700,
            scroll_speed: 400.0,
            world_length: 3200.0,
            jump_height: 200.0,
            lives: 3,
            unicorn_x: 200.0,
            platforms: vec![
                PlatformSpec { x: 0.0, y: 560.0, width: 1800.0, height: 60.0 },
                PlatformSpec { x: 2000.0, y: 470.0, width: 500.0, height: 60.0 },
                PlatformSpec { x: 2700.0, y: 400.0, width: 400.0, height: 60.0 },
            ],
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// `<config dir>/arcade_shell/config.json`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arcade_shell").join("config.json"))
    }

    /// Load the per-user config when present, otherwise the defaults.
    ///
    /// A broken file is reported and ignored rather than aborting startup.
    pub fn discover() -> Self {
        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            return GameConfig::default();
        };
        match Self::load(&path) {
            Ok(config) => {
                info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                warn!("{}; using defaults", err);
                GameConfig::default()
            }
        }
    }
}
