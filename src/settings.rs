//! Game settings
//!
//! Loaded from an optional JSON file; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ATOMS, GRID_SIZE, MAX_ATOMS, MAX_BOARD_SIZE, MIN_ATOMS};
use crate::error::SettingsError;
use crate::sim::ScoreRules;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Atoms hidden per round
    pub atom_count: usize,
    /// Interior side length of the box
    pub board_size: usize,
    /// Base seed for atom placement. `None` picks one from the clock.
    pub seed: Option<u64>,
    /// Ray and guess costs
    pub rules: ScoreRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            atom_count: DEFAULT_ATOMS,
            board_size: GRID_SIZE,
            seed: None,
            rules: ScoreRules::default(),
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check atom count and board size are playable
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.board_size == 0 {
            return Err(SettingsError::Invalid("board_size must be at least 1".into()));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(SettingsError::Invalid(format!(
                "board_size must be at most {}, got {}",
                MAX_BOARD_SIZE, self.board_size
            )));
        }
        if !(MIN_ATOMS..=MAX_ATOMS).contains(&self.atom_count) {
            return Err(SettingsError::Invalid(format!(
                "atom_count must be in {}..={}, got {}",
                MIN_ATOMS, MAX_ATOMS, self.atom_count
            )));
        }
        let capacity = self.board_size * self.board_size;
        if self.atom_count > capacity {
            return Err(SettingsError::Invalid(format!(
                "{} atoms do not fit in a {}x{} box",
                self.atom_count, self.board_size, self.board_size
            )));
        }
        Ok(())
    }

    /// Seed to use, falling back to the current time
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.atom_count, 4);
        assert_eq!(settings.board_size, 8);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings = serde_json::from_str(r#"{"atom_count": 6, "seed": 42}"#).unwrap();
        assert_eq!(settings.atom_count, 6);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.board_size, 8);
        assert_eq!(settings.rules, ScoreRules::default());
        assert_eq!(settings.resolved_seed(), 42);
    }

    #[test]
    fn test_partial_rules() {
        let settings: Settings = serde_json::from_str(r#"{"rules": {"wrong_guess": 3}}"#).unwrap();
        assert_eq!(settings.rules.wrong_guess, 3);
        assert_eq!(settings.rules.exit, 2);
    }

    #[test]
    fn test_validate_ranges() {
        let mut settings = Settings::default();
        settings.atom_count = 0;
        assert!(settings.validate().is_err());
        settings.atom_count = 11;
        assert!(settings.validate().is_err());

        settings.atom_count = 5;
        settings.board_size = 2;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        settings.board_size = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_oversized_board_rejected() {
        let settings: Settings = serde_json::from_str(r#"{"board_size": 1073741824}"#).unwrap();
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let settings = Settings {
            board_size: MAX_BOARD_SIZE,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_large_costs_are_valid() {
        let settings: Settings =
            serde_json::from_str(r#"{"atom_count": 2, "rules": {"wrong_guess": 4000000000}}"#)
                .unwrap();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("blackbox_settings_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"atom_count": 3, "board_size": 6}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings.atom_count, 3);
        assert_eq!(settings.board_size, 6);
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            Settings::load("/nonexistent/blackbox.json"),
            Err(SettingsError::Io(_))
        ));

        let path = std::env::temp_dir().join(format!("blackbox_bad_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        let result = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }
}
