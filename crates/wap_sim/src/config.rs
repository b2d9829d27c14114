//! Simulation configuration, loaded from TOML
//!
//! ```toml
//! [clock]
//! tick_rate = 60
//! max_frame_ms = 200
//!
//! [physics]
//! gravity = 1800.0
//! max_fall_speed = 720.0
//! ```
//!
//! Every key is optional; missing keys take the legacy defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level simulation configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
}

/// Fixed-timestep settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Logic steps per second
    pub tick_rate: u32,
    /// Longest frame fed to the accumulator, in milliseconds
    pub max_frame_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_frame_ms: 200,
        }
    }
}

impl ClockConfig {
    pub fn max_frame(&self) -> Duration {
        Duration::from_millis(self.max_frame_ms)
    }
}

/// Integrator constants, in pixels and seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in px/s²
    pub gravity: f32,
    /// Terminal downward speed in px/s
    pub max_fall_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            max_fall_speed: 720.0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.tick_rate == 0 {
            return Err(ConfigError::Invalid("clock.tick_rate must be positive".to_string()));
        }
        if self.clock.max_frame_ms == 0 {
            return Err(ConfigError::Invalid(
                "clock.max_frame_ms must be positive".to_string(),
            ));
        }
        for (name, value) in [
            ("physics.gravity", self.physics.gravity),
            ("physics.max_fall_speed", self.physics.max_fall_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
