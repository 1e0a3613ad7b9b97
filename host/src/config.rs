//! Host configuration
//!
//! Precedence, highest first: command-line flags, environment variables
//! (`LABYRINTH_WIDTH`, `LABYRINTH_HEIGHT`, `LABYRINTH_SEED`), a JSON config
//! file, built-in defaults.

use std::path::Path;

use labyrinth_core::grid::validate_dimensions;
use labyrinth_core::{CarveOptions, DigRule, Recovery, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use serde::{Deserialize, Serialize};

use crate::HostError;

pub const ENV_WIDTH: &str = "LABYRINTH_WIDTH";
pub const ENV_HEIGHT: &str = "LABYRINTH_HEIGHT";
pub const ENV_SEED: &str = "LABYRINTH_SEED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Grid width, odd and at least 5
    pub width: usize,
    /// Grid height, odd and at least 5
    pub height: usize,
    /// Fixed maze seed; a random one is drawn when absent
    pub seed: Option<u32>,
    pub rule: DigRule,
    pub recovery: Recovery,
    pub stop_at_goal: bool,
    /// Default tracing directive when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            rule: DigRule::default(),
            recovery: Recovery::default(),
            stop_at_goal: true,
            log_level: "info".to_string(),
        }
    }
}

impl HostConfig {
    /// Read a JSON config file; missing keys take their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, HostError> {
        let json = std::fs::read_to_string(path)?;
        let config: HostConfig = serde_json::from_str(&json)
            .map_err(|e| HostError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Defaults, then the optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, HostError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup` so tests need not touch
    /// the real process environment
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), HostError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(width) = lookup(ENV_WIDTH) {
            self.width = parse_env(ENV_WIDTH, &width)?;
        }
        if let Some(height) = lookup(ENV_HEIGHT) {
            self.height = parse_env(ENV_HEIGHT, &height)?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_env(ENV_SEED, &seed)?);
        }
        Ok(())
    }

    /// Reject dimensions the carver cannot use
    pub fn validate(&self) -> Result<(), HostError> {
        validate_dimensions(self.width, self.height)?;
        Ok(())
    }

    pub fn carve_options(&self) -> CarveOptions {
        CarveOptions {
            rule: self.rule,
            recovery: self.recovery,
            stop_at_goal: self.stop_at_goal,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, HostError> {
    value
        .trim()
        .parse()
        .map_err(|_| HostError::Config(format!("{} has invalid value '{}'", key, value)))
}
