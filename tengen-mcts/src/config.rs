//! Engine configuration.
//!
//! The same YAML file drives the CLI and any embedding application. Every
//! field has a default so partial files load.

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
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Board settings.
    #[serde(default)]
    pub game: GameConfig,
    /// Search settings.
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Board settings.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct GameConfig {
    /// Play-area edge length.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Compensation added to White's score.
    #[serde(default = "default_komi")]
    pub komi: f32,
}

fn default_size() -> usize {
    9
}

fn default_komi() -> f32 {
    6.5
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            komi: default_komi(),
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct MctsConfig {
    /// Seed for the search's ChaCha8 RNG. Fixed seed, fixed result.
    #[serde(default)]
    pub seed: u64,
    /// Child selection score.
    #[serde(default)]
    pub selection: SelectionPolicy,
    /// Rollout move-source probabilities.
    #[serde(default)]
    pub playout: PlayoutConfig,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            selection: SelectionPolicy::default(),
            playout: PlayoutConfig::default(),
        }
    }
}

/// How descent picks among children.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Blend the all-moves-as-first estimate into the win expectation with
    /// weight `beta = av / (av + v + v*av/rave_equiv)`.
    Rave {
        #[serde(default = "default_rave_equiv")]
        rave_equiv: f64,
    },
    /// Plain UCB1; unvisited children score infinity.
    Ucb1 {
        #[serde(default = "default_ucb1_exploration")]
        exploration: f64,
    },
}

fn default_rave_equiv() -> f64 {
    3500.0
}

fn default_ucb1_exploration() -> f64 {
    std::f64::consts::SQRT_2
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Rave {
            rave_equiv: default_rave_equiv(),
        }
    }
}

/// Rollout move-source probabilities.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct PlayoutConfig {
    /// Chance of probing the stale-ko recapture first.
    #[serde(default = "default_ko_prob")]
    pub ko_prob: f64,
    /// Chance of probing capture moves near the last two stones next.
    #[serde(default = "default_capture_prob")]
    pub capture_prob: f64,
}

fn default_ko_prob() -> f64 {
    0.4
}

fn default_capture_prob() -> f64 {
    0.3
}

impl Default for PlayoutConfig {
    fn default() -> Self {
        Self {
            ko_prob: default_ko_prob(),
            capture_prob: default_capture_prob(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
