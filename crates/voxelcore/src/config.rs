//! # Configuration
//!
//! One TOML file drives both the mesher and the codec:
//!
//! ```toml
//! [mesher]
//! ambient_occlusion = true
//! ao_step = 0.18
//! min_shade = 0.35
//!
//! [codec]
//! compression_level = 9
//! ```
//!
//! Every field has a default, so an empty file is a valid config.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxelcore_io::{VxmCodec, VxmConfig};
use voxelcore_mesh::{GreedyMesher, MesherConfig};

/// Errors that can occur while loading a config.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// The config is not valid TOML or has wrong field types.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for every VoxelCore component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// `[mesher]` table.
    pub mesher: MesherConfig,
    /// `[codec]` table.
    pub codec: VxmConfig,
}

impl CoreConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise see
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;

        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad field.
    pub fn validate(&self) -> ConfigResult<()> {
        let mesher = &self.mesher;
        if !(mesher.ao_step.is_finite() && mesher.ao_step >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "mesher.ao_step must be a non-negative number, got {}",
                mesher.ao_step
            )));
        }
        if !(0.0..=1.0).contains(&mesher.min_shade) {
            return Err(ConfigError::Invalid(format!(
                "mesher.min_shade must be within 0.0..=1.0, got {}",
                mesher.min_shade
            )));
        }
        if self.codec.compression_level > 9 {
            return Err(ConfigError::Invalid(format!(
                "codec.compression_level must be within 0..=9, got {}",
                self.codec.compression_level
            )));
        }
        Ok(())
    }

    /// A mesher using the `[mesher]` settings.
    #[must_use]
    pub fn mesher(&self) -> GreedyMesher {
        GreedyMesher::with_config(self.mesher)
    }

    /// A codec using the `[codec]` settings.
    #[must_use]
    pub fn codec(&self) -> VxmCodec {
        VxmCodec::with_config(self.codec)
    }
}
