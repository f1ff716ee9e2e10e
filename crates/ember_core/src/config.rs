//! Render configuration.
//!
//! Defaults reproduce the classic small preview: 200x100 pixels,
//! 100 samples per pixel, 50 bounces, gamma 2.2.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render configuration shared by the integrator and the driver binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Jittered camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Scatter events allowed before a path contributes black
    pub max_bounces: u32,
    /// Display gamma; pixels are encoded with exponent 1/gamma
    pub gamma: f32,
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
    /// Directory the image sink writes into
    pub output_dir: PathBuf,
    /// Also write the orientation gradient image
    pub write_gradient: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            samples_per_pixel: 100,
            max_bounces: 50,
            gamma: 2.2,
            seed: None,
            output_dir: PathBuf::from("."),
            write_gradient: true,
        }
    }
}

impl RenderConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded render config from {}", path.display());
        Ok(config)
    }

    /// Check the values the integrator relies on.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::Invalid(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gamma must be positive and finite, got {}",
                self.gamma
            )));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
