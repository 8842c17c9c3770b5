//! Game configuration supplied by the settings collaborator
//!
//! A [`GameConfig`] is a plain value handed to [`crate::GameState::new`]; nothing
//! in the engine reads settings from a global store.
//!
//! Sources, later ones winning:
//!
//! 1. Defaults: item mode off, normal difficulty, seed 1
//! 2. Environment: `TETRIS_ITEM_MODE`, `TETRIS_DIFFICULTY`, `TETRIS_SEED`
//! 3. Arguments: `--items` / `--no-items`, `--difficulty <easy|normal|hard>`, `--seed <u32>`

use thiserror::Error;

use crate::types::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::MissingValue(_) => "missing_value",
            ConfigError::InvalidValue { .. } => "invalid_value",
            ConfigError::UnknownArgument(_) => "unknown_argument",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub item_mode: bool,
    pub difficulty: Difficulty,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            item_mode: false,
            difficulty: Difficulty::Normal,
            seed: 1,
        }
    }
}

impl GameConfig {
    pub fn new(item_mode: bool, difficulty: Difficulty) -> Self {
        Self {
            item_mode,
            difficulty,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Parse command-line flags on top of `self`
    pub fn with_args(mut self, args: &[String]) -> Result<Self, ConfigError> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--items" => self.item_mode = true,
                "--no-items" => self.item_mode = false,
                flag @ ("--difficulty" | "--seed") => {
                    i += 1;
                    let value = args
                        .get(i)
                        .ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
                    if flag == "--difficulty" {
                        self.difficulty = parse_difficulty(flag, value)?;
                    } else {
                        self.seed = parse_seed(flag, value)?;
                    }
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
            i += 1;
        }
        Ok(self)
    }

    /// Overlay `TETRIS_*` environment variables that are set
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(mut self, get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(v) = get("TETRIS_ITEM_MODE") {
            self.item_mode = parse_bool("TETRIS_ITEM_MODE", &v)?;
        }
        if let Some(v) = get("TETRIS_DIFFICULTY") {
            self.difficulty = parse_difficulty("TETRIS_DIFFICULTY", &v)?;
        }
        if let Some(v) = get("TETRIS_SEED") {
            self.seed = parse_seed("TETRIS_SEED", &v)?;
        }
        Ok(self)
    }
}

fn invalid(flag: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

fn parse_difficulty(flag: &str, value: &str) -> Result<Difficulty, ConfigError> {
    Difficulty::from_str(value).ok_or_else(|| invalid(flag, value))
}

fn parse_seed(flag: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| invalid(flag, value))
}

fn parse_bool(flag: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(invalid(flag, value)),
    }
}
