//! Inference for the attrition classifier.
//!
//! The [`Predictor`] turns a scaled vector into a raw score and applies the
//! logistic [`sigmoid`]; the label is `leaves` when the probability is at
//! least [`DECISION_THRESHOLD`].

mod predictor;
mod transform;

pub use predictor::{Attrition, PredictionResult, Predictor, DECISION_THRESHOLD};
pub use transform::sigmoid;
