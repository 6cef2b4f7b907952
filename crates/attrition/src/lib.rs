//! attrition: employee attrition prediction with per-feature attributions.
//!
//! Serves a pre-trained logistic model over a fixed feature schema. A raw
//! employee record is encoded against the schema, standardized, scored and
//! attributed feature by feature.
//!
//! # Key Types
//!
//! - [`AttritionModel`] - Pipeline facade holding the validated artifacts
//! - [`PipelineConfig`] - Runtime configuration builder
//! - [`RawRecord`] - Employee attributes for one request
//! - [`PredictionResult`] / [`AttributionResult`] - Response parts
//!
//! # Loading Artifacts
//!
//! Use [`AttritionModel::load_dir`] for a directory of `columns.json`,
//! `scaler.json` and `model.json`, or [`AttritionModel::load_bundle`] for a
//! single bundle document. See the [`persist`] module for the formats.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod dataset;
pub mod error;
pub mod explainability;
pub mod inference;
pub mod model;
pub mod persist;
pub mod preprocess;
pub mod repr;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use model::{Assessment, AttritionModel, PipelineConfig, PipelineConfigError};

pub use dataset::{AttributeCatalog, AttributeValue, FeatureSchema, RawRecord};

pub use error::{ArtifactError, ArtifactKind, ConfigurationError, Error, Stage};

pub use explainability::{AttributionResult, Explainer, FeatureAttribution};
pub use inference::{Attrition, PredictionResult};

pub use persist::ArtifactSet;

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
