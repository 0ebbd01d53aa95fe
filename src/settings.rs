//! Session settings and balance parameters
//!
//! Loaded from a JSON file on native builds; every field has a default so a
//! partial file is fine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Smallest map side the simulation accepts
pub const MIN_MAP_DIMENSION: f32 = 200.0;

/// Errors from reading or validating a settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// How a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Ends on player death
    #[default]
    Challenge,
    /// Ends on player death; a timer keeps injecting fresh bots
    Endless,
    /// Ends when the time limit runs out, alive or not
    Timed,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Challenge => "challenge",
            GameMode::Endless => "endless",
            GameMode::Timed => "timed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "challenge" => Some(GameMode::Challenge),
            "endless" => Some(GameMode::Endless),
            "timed" => Some(GameMode::Timed),
            _ => None,
        }
    }
}

/// Difficulty tag applied to generated bots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Starting-mass multiplier for generated bots
    pub fn mass_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }
}

/// What happens to a ball that strikes a virus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VirusPolicy {
    /// The struck ball dies; its mass goes to the fragments
    #[default]
    Shatter,
    /// The struck ball survives carrying one fragment's share
    KeepLargest,
}

/// Tuned balance constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    /// Fraction of prey mass a predator keeps
    pub eat_retention: f32,
    /// Predator mass must exceed prey mass times this
    pub eat_mass_ratio: f32,
    /// Fragment mass is `mass / (fragments + offset)`
    pub virus_fragment_divisor_offset: u32,
    /// Upper bound on fragments per virus strike
    pub max_virus_fragments: usize,
    pub virus_policy: VirusPolicy,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            eat_retention: EAT_RETENTION,
            eat_mass_ratio: EAT_MASS_RATIO,
            virus_fragment_divisor_offset: 1,
            max_virus_fragments: MAX_VIRUS_FRAGMENTS,
            virus_policy: VirusPolicy::Shatter,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Map ===
    pub map_width: f32,
    pub map_height: f32,
    pub grid_cell_size: f32,

    // === Population ===
    pub food_count: usize,
    pub virus_count: usize,
    /// Bots generated when no AI profiles are supplied
    pub basic_bot_count: usize,

    // === Session ===
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// Only used in timed mode
    pub time_limit_secs: f32,
    /// Run seed; the runner picks one when absent
    pub seed: Option<u64>,

    pub balance: Balance,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            grid_cell_size: GRID_CELL_SIZE,

            food_count: FOOD_COUNT,
            virus_count: VIRUS_COUNT,
            basic_bot_count: BASIC_BOT_COUNT,

            mode: GameMode::Challenge,
            difficulty: Difficulty::Normal,
            time_limit_secs: TIMED_LIMIT_SECS,
            seed: None,

            balance: Balance::default(),
        }
    }
}

impl Settings {
    /// Settings for a given mode/difficulty, everything else default
    pub fn for_mode(mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            mode,
            difficulty,
            ..Self::default()
        }
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.map_width > 0.0 && self.map_height > 0.0) {
            return Err(SettingsError::Invalid(
                "Map dimensions must be positive".to_string(),
            ));
        }
        if !(self.grid_cell_size > 0.0) {
            return Err(SettingsError::Invalid(
                "Grid cell size must be positive".to_string(),
            ));
        }
        if !(self.balance.eat_retention > 0.0 && self.balance.eat_retention <= 1.0) {
            return Err(SettingsError::Invalid(
                "Eat retention must be in (0, 1]".to_string(),
            ));
        }
        if !(self.balance.eat_mass_ratio >= 1.0) {
            return Err(SettingsError::Invalid(
                "Eat mass ratio must be at least 1".to_string(),
            ));
        }
        if self.balance.virus_fragment_divisor_offset == 0 {
            return Err(SettingsError::Invalid(
                "Virus fragment divisor offset must be at least 1".to_string(),
            ));
        }
        if self.balance.max_virus_fragments == 0 {
            return Err(SettingsError::Invalid(
                "Virus fragment cap must be greater than 0".to_string(),
            ));
        }
        if self.mode == GameMode::Timed && !(self.time_limit_secs > 0.0) {
            return Err(SettingsError::Invalid(
                "Timed mode needs a positive time limit".to_string(),
            ));
        }
        Ok(())
    }

    /// Copy with every value `validate` would reject replaced by something
    /// the simulation can run with
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let dimension = |v: f32, fallback: f32| {
            if v.is_finite() {
                v.max(MIN_MAP_DIMENSION)
            } else {
                fallback
            }
        };

        let mut settings = self.clone();
        settings.map_width = dimension(self.map_width, defaults.map_width);
        settings.map_height = dimension(self.map_height, defaults.map_height);
        if !(self.grid_cell_size.is_finite() && self.grid_cell_size > 0.0) {
            settings.grid_cell_size = defaults.grid_cell_size;
        }
        if !(self.time_limit_secs.is_finite() && self.time_limit_secs > 0.0) {
            settings.time_limit_secs = defaults.time_limit_secs;
        }

        let balance = &mut settings.balance;
        if !(balance.eat_retention > 0.0 && balance.eat_retention <= 1.0) {
            balance.eat_retention = defaults.balance.eat_retention;
        }
        if !(balance.eat_mass_ratio.is_finite() && balance.eat_mass_ratio >= 1.0) {
            balance.eat_mass_ratio = defaults.balance.eat_mass_ratio;
        }
        balance.virus_fragment_divisor_offset = balance.virus_fragment_divisor_offset.max(1);
        if balance.max_virus_fragments == 0 {
            balance.max_virus_fragments = defaults.balance.max_virus_fragments;
        }
        settings
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.balance.eat_retention, 0.8);
        assert_eq!(settings.balance.max_virus_fragments, 8);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "mode": "timed", "balance": { "eat_retention": 0.5 } }"#)
                .unwrap();
        assert_eq!(settings.mode, GameMode::Timed);
        assert_eq!(settings.balance.eat_retention, 0.5);
        assert_eq!(settings.balance.eat_mass_ratio, EAT_MASS_RATIO);
        assert_eq!(settings.food_count, FOOD_COUNT);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.map_width = 0.0;
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid(_))));

        let mut settings = Settings::default();
        settings.balance.eat_retention = 1.5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::for_mode(GameMode::Timed, Difficulty::Hard);
        settings.time_limit_secs = 0.0;
        assert!(settings.validate().is_err());

        // A zero offset would let a KeepLargest strike create mass
        let mut settings = Settings::default();
        settings.balance.virus_policy = VirusPolicy::KeepLargest;
        settings.balance.virus_fragment_divisor_offset = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_sanitized_repairs_bad_values() {
        let mut settings = Settings::for_mode(GameMode::Timed, Difficulty::Normal);
        settings.map_width = 0.0;
        settings.map_height = f32::NAN;
        settings.grid_cell_size = -5.0;
        settings.time_limit_secs = 0.0;
        settings.balance.eat_retention = 2.0;
        settings.balance.eat_mass_ratio = 0.5;
        settings.balance.virus_fragment_divisor_offset = 0;
        settings.balance.max_virus_fragments = 0;

        let fixed = settings.sanitized();
        assert!(fixed.validate().is_ok());
        assert_eq!(fixed.map_width, MIN_MAP_DIMENSION);
        assert_eq!(fixed.map_height, MAP_HEIGHT);
        assert_eq!(fixed.grid_cell_size, GRID_CELL_SIZE);
        assert_eq!(fixed.time_limit_secs, TIMED_LIMIT_SECS);
        assert_eq!(fixed.balance.virus_fragment_divisor_offset, 1);

        let valid = Settings::default();
        assert_eq!(valid.sanitized().map_width, valid.map_width);
    }

    #[test]
    fn test_mode_and_difficulty_strings() {
        assert_eq!(GameMode::from_str("ENDLESS"), Some(GameMode::Endless));
        assert_eq!(GameMode::from_str("bogus"), None);
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("med"), None);
        assert_eq!(Difficulty::Hard.mass_multiplier(), 1.5);
        assert_eq!(GameMode::Timed.as_str(), "timed");
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!(
            "ball_battle_settings_{}.json",
            std::process::id()
        ));
        let mut settings = Settings::for_mode(GameMode::Endless, Difficulty::Easy);
        settings.seed = Some(42);
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.mode, GameMode::Endless);
        assert_eq!(loaded.seed, Some(42));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
