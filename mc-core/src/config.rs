//! Unified configuration schema for the advisor and the self-play driver.
//!
//! One YAML file configures every component; each section has full serde
//! defaults so a partial (or absent) file still yields a runnable setup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Monte-Carlo advisor settings.
    #[serde(default)]
    pub advisor: AdvisorConfig,
    /// Self-play driver settings.
    #[serde(default)]
    pub selfplay: SelfplayConfig,
    /// Event logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Monte-Carlo advisor configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct AdvisorConfig {
    /// Rollout depth in rounds; each trial plays `depth * 2` plies.
    #[serde(default = "default_depth")]
    pub depth: u32,
    /// Randomized trials averaged per candidate move.
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// Base seed for the advisor's RNG streams.
    #[serde(default)]
    pub seed: u64,
}

fn default_depth() -> u32 {
    2
}

fn default_trials() -> u32 {
    10
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            trials: default_trials(),
            seed: 0,
        }
    }
}

/// Self-play driver configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SelfplayConfig {
    /// Number of games to play.
    #[serde(default = "default_games")]
    pub games: u32,
    /// Abort a game as undecided after this many plies.
    #[serde(default = "default_max_plies")]
    pub max_plies: u32,
}

fn default_games() -> u32 {
    1
}

fn default_max_plies() -> u32 {
    200
}

impl Default for SelfplayConfig {
    fn default() -> Self {
        Self {
            games: default_games(),
            max_plies: default_max_plies(),
        }
    }
}

/// Event logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// NDJSON event file path. `None` disables event logging.
    #[serde(default)]
    pub events_path: Option<String>,
    /// Flush the event writer every N lines; 0 flushes only on close.
    #[serde(default)]
    pub flush_every_lines: u64,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            advisor: AdvisorConfig::default(),
            selfplay: SelfplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
