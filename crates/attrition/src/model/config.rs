//! Runtime configuration for [`AttritionModel`](super::AttritionModel).
//!
//! [`PipelineConfig`] is built with a `bon` builder that validates at build
//! time, or read from a TOML document with the same defaults.
//!
//! # Example
//!
//! ```
//! use attrition::model::PipelineConfig;
//!
//! // All defaults: top 5 attributions, automatic threading
//! let config = PipelineConfig::builder().build().unwrap();
//! assert_eq!(config.top_k, 5);
//!
//! let config = PipelineConfig::builder().top_k(3).n_threads(1).build().unwrap();
//! assert_eq!(config.n_threads, 1);
//!
//! let config = PipelineConfig::from_toml_str("top_k = 10").unwrap();
//! assert_eq!(config.top_k, 10);
//! ```

use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};

/// Number of attributions shown by default.
pub const DEFAULT_TOP_K: usize = 5;

// =============================================================================
// PipelineConfigError
// =============================================================================

/// Errors raised while building or loading a [`PipelineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineConfigError {
    /// `top_k` must be at least 1.
    #[error("top_k must be at least 1, got {0}")]
    InvalidTopK(usize),

    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

// =============================================================================
// PipelineConfig
// =============================================================================

/// Settings for serving predictions.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Attributions surfaced for display. Default: 5.
    ///
    /// The full ranked list is always computed.
    #[builder(default = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Threads for batch assessment. `0` = auto, `1` = sequential.
    #[builder(default)]
    pub n_threads: usize,
}

impl<S: pipeline_config_builder::IsComplete> PipelineConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineConfigError::InvalidTopK`] if `top_k == 0`.
    pub fn build(self) -> Result<PipelineConfig, PipelineConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            n_threads: 0,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), PipelineConfigError> {
        if self.top_k == 0 {
            return Err(PipelineConfigError::InvalidTopK(self.top_k));
        }
        Ok(())
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, PipelineConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PipelineConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
