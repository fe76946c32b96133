//! Game tuning, loaded from JSON with per-field defaults.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_levels_dir() -> PathBuf {
    PathBuf::from("assets/levels")
}
const fn default_first_level() -> u32 {
    1
}
const fn default_pixels_per_meter() -> f32 {
    100.0
}
const fn default_player_speed() -> f32 {
    240.0
}
const fn default_bug_speed() -> f32 {
    60.0
}
const fn default_player_size() -> [f32; 2] {
    [32.0, 32.0]
}
const fn default_bug_size() -> [f32; 2] {
    [28.0, 28.0]
}
const fn default_wander_interval() -> f32 {
    1.5
}
const fn default_next_level_hitbox() -> [f32; 2] {
    [160.0, 32.0]
}

/// Main game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct GameConfig {
    /// Directory holding `level-{n}.json` maps.
    #[serde(default = "default_levels_dir")]
    pub levels_dir: PathBuf,

    /// Level a new game starts on.
    #[serde(default = "default_first_level")]
    pub first_level: u32,

    /// Physics scale handed to the rapier plugin.
    #[serde(default = "default_pixels_per_meter")]
    pub pixels_per_meter: f32,

    /// Player running speed in pixels/sec.
    #[serde(default = "default_player_speed")]
    pub player_speed: f32,

    /// Wandering speed of both bug kinds in pixels/sec.
    #[serde(default = "default_bug_speed")]
    pub bug_speed: f32,

    /// Player body size `[width, height]` in pixels.
    #[serde(default = "default_player_size")]
    pub player_size: [f32; 2],

    /// Bug body size `[width, height]` in pixels.
    #[serde(default = "default_bug_size")]
    pub bug_size: [f32; 2],

    /// Seconds a wandering bug keeps a heading.
    #[serde(default = "default_wander_interval")]
    pub wander_interval_secs: f32,

    /// Size of the "Next level?" tap target in screen pixels.
    #[serde(default = "default_next_level_hitbox")]
    pub next_level_hitbox: [f32; 2],

    /// Rounds running longer than this are lost. `None` disables the limit.
    #[serde(default)]
    pub round_time_limit_secs: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            levels_dir: default_levels_dir(),
            first_level: default_first_level(),
            pixels_per_meter: default_pixels_per_meter(),
            player_speed: default_player_speed(),
            bug_speed: default_bug_speed(),
            player_size: default_player_size(),
            bug_size: default_bug_size(),
            wander_interval_secs: default_wander_interval(),
            next_level_hitbox: default_next_level_hitbox(),
            round_time_limit_secs: None,
        }
    }
}

impl GameConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parses and validates a config document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_level == 0 {
            return Err(ConfigError::invalid("first_level", "levels are numbered from 1"));
        }

        let positive = [
            ("pixels_per_meter", self.pixels_per_meter),
            ("player_speed", self.player_speed),
            ("bug_speed", self.bug_speed),
            ("wander_interval_secs", self.wander_interval_secs),
            ("player_size.width", self.player_size[0]),
            ("player_size.height", self.player_size[1]),
            ("bug_size.width", self.bug_size[0]),
            ("bug_size.height", self.bug_size[1]),
            ("next_level_hitbox.width", self.next_level_hitbox[0]),
            ("next_level_hitbox.height", self.next_level_hitbox[1]),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("{value} (must be > 0)")));
            }
        }

        if let Some(limit) = self.round_time_limit_secs {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(ConfigError::invalid(
                    "round_time_limit_secs",
                    format!("{limit} (must be > 0)"),
                ));
            }
        }

        Ok(())
    }

    pub fn player_size(&self) -> Vec2 {
        Vec2::from(self.player_size)
    }

    pub fn bug_size(&self) -> Vec2 {
        Vec2::from(self.bug_size)
    }

    pub fn next_level_hitbox(&self) -> Vec2 {
        Vec2::from(self.next_level_hitbox)
    }
}
