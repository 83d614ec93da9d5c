//! Configuration system
//!
//! TOML-backed configuration with typed defaults. Applications load an
//! [`EngineConfig`] at startup and hand the renderer section to the frame
//! resource pipeline.

use crate::render::MAX_POINT_LIGHTS;
use serde::{Deserialize, Serialize};

/// Configuration trait for TOML-serializable config types
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a TOML file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// A field failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Application name, used for window titles and log prefixes
    pub application_name: String,

    /// Renderer section
    pub renderer: RendererConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            application_name: "Orbit Engine Application".to_string(),
            renderer: RendererConfig::default(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Validate field ranges, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.renderer.validate()
    }
}

/// Renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Maximum frames in flight (CPU frames prepared while the GPU consumes
    /// earlier ones). Small fixed constant, typically 2 or 3.
    pub max_frames_in_flight: usize,

    /// Point light budget per frame. Clamped to the update block's
    /// fixed array capacity.
    pub max_point_lights: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            max_frames_in_flight: 2,
            max_point_lights: MAX_POINT_LIGHTS,
        }
    }
}

impl RendererConfig {
    /// Validate field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_frames_in_flight == 0 {
            return Err(ConfigError::Invalid(
                "max_frames_in_flight must be at least 1".to_string(),
            ));
        }
        if self.max_point_lights > MAX_POINT_LIGHTS {
            return Err(ConfigError::Invalid(format!(
                "max_point_lights {} exceeds the update block capacity {}",
                self.max_point_lights, MAX_POINT_LIGHTS
            )));
        }
        Ok(())
    }
}
