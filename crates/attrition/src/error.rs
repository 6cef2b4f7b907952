//! Error types.
//!
//! Two failure classes exist and neither is retryable:
//!
//! - [`ArtifactError`]: the trained artifacts are missing, unreadable or
//!   structurally invalid. Raised while loading, before any request is served.
//! - [`ConfigurationError`]: two pipeline stages disagree on the number of
//!   features. Signals schema/artifact version skew.
//!
//! Unknown categories and missing attributes in a record are not errors.

use std::fmt;
use std::path::PathBuf;

use crate::model::PipelineConfigError;

// =============================================================================
// ArtifactError
// =============================================================================

/// Which trained artifact an [`ArtifactError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Ordered feature names.
    Schema,
    /// Per-feature mean and scale.
    Scaler,
    /// Per-feature weights and bias.
    Model,
    /// Single document holding all three.
    Bundle,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Schema => "feature schema",
            Self::Scaler => "scaling parameters",
            Self::Model => "model weights",
            Self::Bundle => "artifact bundle",
        };
        f.write_str(name)
    }
}

/// Failure to load or validate the trained artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read {kind} from {}", path.display())]
    Io {
        kind: ArtifactKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind}")]
    Parse {
        kind: ArtifactKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {kind}")]
    Write {
        kind: ArtifactKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} is empty")]
    Empty(ArtifactKind),

    #[error("duplicate feature name {name:?} at positions {first} and {second}")]
    DuplicateFeature {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("{kind} has {actual} entries but the feature schema has {expected}")]
    LengthMismatch {
        kind: ArtifactKind,
        expected: usize,
        actual: usize,
    },

    #[error("{kind} contains non-finite value {value} for {feature:?}")]
    NonFinite {
        kind: ArtifactKind,
        feature: String,
        value: f64,
    },

    #[error("scale for feature {feature:?} is {value}, expected a non-zero finite value")]
    DegenerateScale { feature: String, value: f64 },
}

// =============================================================================
// ConfigurationError
// =============================================================================

/// Pipeline stage that detected a feature-count disagreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Scaling,
    Prediction,
    Attribution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scaling => "scaler",
            Self::Prediction => "predictor",
            Self::Attribution => "attributor",
        };
        f.write_str(name)
    }
}

/// Vector lengths disagree between pipeline stages.
///
/// Never raised for a well-formed deployment: encoder output always has the
/// schema's length, so this only fires when artifacts from different training
/// runs are mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{stage} expects {expected} features, got {actual}")]
    LengthMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },
}

impl ConfigurationError {
    /// Returns `Ok(())` when `actual == expected`.
    pub(crate) fn check_len(stage: Stage, expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::LengthMismatch {
                stage,
                expected,
                actual,
            })
        }
    }
}

// =============================================================================
// Crate-level error
// =============================================================================

/// Any error surfaced by the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Config(#[from] PipelineConfigError),
}
