//! Loading and saving the trained artifacts.
//!
//! Artifacts are JSON documents. Two layouts are supported:
//!
//! - a directory with [`SCHEMA_FILE`], [`SCALER_FILE`] and [`MODEL_FILE`]
//! - a single bundle document with `feature_names`, `scaler` and `model`
//!
//! ```json
//! {
//!   "feature_names": ["Age", "OverTime_No", "OverTime_Yes"],
//!   "scaler": {"mean": [36.9, 0.72, 0.28], "scale": [9.1, 0.45, 0.45]},
//!   "model": {"weights": [-0.35, -0.46, 0.46], "bias": -2.1}
//! }
//! ```
//!
//! Every load validates the set as a whole; a set that fails validation is an
//! [`ArtifactError`](crate::ArtifactError) and must not be served.

mod artifacts;
mod convert;
mod schema;

pub use artifacts::{load_schema, read_schema, ArtifactSet, MODEL_FILE, SCALER_FILE, SCHEMA_FILE};
pub use schema::{ArtifactBundleSchema, FeatureNamesSchema, LinearModelSchema, ScalerSchema};
