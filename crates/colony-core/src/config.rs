//! Game configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Command-line flags override whatever the file sets.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use colony_logic::constants::colony::STARTING_COLONISTS;
use colony_logic::constants::events::TRIGGER_CHANCE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub colony_name: String,
    /// Where the colony is saved between runs.
    pub save_path: PathBuf,
    /// Fixed RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Save after every turn.
    pub autosave: bool,
    /// Probability that a random event fires in a turn.
    pub event_chance: f64,
    pub starting_colonists: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            colony_name: "New Colony".to_string(),
            save_path: PathBuf::from("saves/colony.sav"),
            seed: None,
            autosave: true,
            event_chance: TRIGGER_CHANCE,
            starting_colonists: STARTING_COLONISTS,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.colony_name.trim().is_empty() {
            return Err(ConfigError::Invalid("colony_name must not be empty".into()));
        }
        if !(0.0..=1.0).contains(&self.event_chance) {
            return Err(ConfigError::Invalid(format!(
                "event_chance must be within [0, 1], got {}",
                self.event_chance
            )));
        }
        if self.save_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("save_path must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.event_chance, 0.3);
        assert_eq!(config.starting_colonists, 3);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "colony_name": "Kepler", "seed": 7 }"#).unwrap();
        assert_eq!(config.colony_name, "Kepler");
        assert_eq!(config.seed, Some(7));
        assert!(config.autosave);
        assert_eq!(config.save_path, PathBuf::from("saves/colony.sav"));
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = GameConfig {
            event_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.event_chance = f64::NAN;
        assert!(config.validate().is_err());

        config.event_chance = 0.0;
        config.colony_name = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        fs::write(&path, r#"{ "event_chance": 0.0, "autosave": false }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.event_chance, 0.0);
        assert!(!config.autosave);

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse(_))));
    }
}
