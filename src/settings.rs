//! Engine configuration
//!
//! Constructor parameters for an [`Engine`](crate::sim::Engine). Can be
//! loaded from and saved to a JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::EngineError;

/// Errors reading or writing a configuration file
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] EngineError),
}

/// Arena and population parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub arena_width: f32,
    pub arena_height: f32,
    /// Pellets kept in the arena
    pub num_pellets: usize,
    /// Viruses kept in the arena
    pub num_viruses: usize,
    /// Top pellets back up every tick
    pub pellet_regen: bool,
    /// RNG seed for placement and colors
    pub seed: u64,
    /// Simulated seconds a split or popped cell waits before merging
    pub recombine_time: f32,
    /// Policies are consulted every `policy_interval` ticks
    pub policy_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            num_pellets: DEFAULT_NUM_PELLETS,
            num_viruses: DEFAULT_NUM_VIRUSES,
            pellet_regen: true,
            seed: DEFAULT_SEED,
            recombine_time: RECOMBINE_TIMER_SEC,
            policy_interval: 1,
        }
    }
}

impl EngineConfig {
    /// Square arena of the given size with default populations
    pub fn with_arena_size(size: f32) -> Self {
        Self {
            arena_width: size,
            arena_height: size,
            ..Self::default()
        }
    }

    /// Empty arena: no pellets, no viruses, no regeneration
    pub fn empty(width: f32, height: f32) -> Self {
        Self {
            arena_width: width,
            arena_height: height,
            num_pellets: 0,
            num_viruses: 0,
            pellet_regen: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            return Err(EngineError::InvalidConfig("arena_width must be positive"));
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            return Err(EngineError::InvalidConfig("arena_height must be positive"));
        }
        if !(self.recombine_time.is_finite() && self.recombine_time >= 0.0) {
            return Err(EngineError::InvalidConfig(
                "recombine_time must be non-negative",
            ));
        }
        if self.policy_interval == 0 {
            return Err(EngineError::InvalidConfig("policy_interval must be non-zero"));
        }
        Ok(())
    }

    /// Load and validate a JSON config file; missing fields take defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded engine config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigLoadError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Engine config saved to {}", path.as_ref().display());
        Ok(())
    }
}
