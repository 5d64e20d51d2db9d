//! Game configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::constants::*;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable game options.
///
/// Every field falls back to its default when missing, and keys the game does
/// not recognize are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Max (and starting) health of a new hero
    pub starting_health: u32,

    /// Base damage of a new hero
    pub starting_damage: u32,

    /// Fractional max-health growth applied on each level-up
    pub level_up_health_pct: f64,

    /// Fractional base-damage growth applied on each level-up
    pub level_up_damage_pct: f64,

    /// Inventory capacity of a new hero
    pub max_inventory_slots: usize,

    /// Chance (0.0-1.0) that an attack inside an encounter is critical
    pub crit_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: DEFAULT_STARTING_HEALTH,
            starting_damage: DEFAULT_STARTING_DAMAGE,
            level_up_health_pct: DEFAULT_LEVEL_UP_HEALTH_PCT,
            level_up_damage_pct: DEFAULT_LEVEL_UP_DAMAGE_PCT,
            max_inventory_slots: DEFAULT_MAX_INVENTORY_SLOTS,
            crit_chance: DEFAULT_CRIT_CHANCE,
        }
    }
}

impl GameConfig {
    /// Loads and validates a config file. `.json` files are parsed as JSON,
    /// everything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        let cfg: GameConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&data)?
        } else {
            toml::from_str(&data)?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let cfg: GameConfig = toml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_health == 0 {
            return Err(ConfigError::Invalid(
                "starting_health must be greater than 0".into(),
            ));
        }
        if self.level_up_health_pct < 0.0 || self.level_up_damage_pct < 0.0 {
            return Err(ConfigError::Invalid(
                "level-up percentages must not be negative".into(),
            ));
        }
        if self.max_inventory_slots == 0 {
            return Err(ConfigError::Invalid(
                "max_inventory_slots must be greater than 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crit_chance) {
            return Err(ConfigError::Invalid(format!(
                "crit_chance must be within 0.0..=1.0, got {}",
                self.crit_chance
            )));
        }
        Ok(())
    }
}
