//! Logistic prediction over scaled vectors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::transform::sigmoid;
use crate::dataset::FeatureSchema;
use crate::error::{ConfigurationError, Stage};
use crate::preprocess::ScaledVector;
use crate::repr::LinearModel;

/// Probability at or above which an employee is predicted to leave.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attrition {
    Stays,
    Leaves,
}

impl fmt::Display for Attrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stays => f.write_str("stays"),
            Self::Leaves => f.write_str("leaves"),
        }
    }
}

/// Class label and probability of leaving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: Attrition,
    /// Probability of [`Attrition::Leaves`], in `[0, 1]`.
    pub probability: f64,
    /// Raw model score the probability was derived from.
    pub margin: f64,
}

impl PredictionResult {
    /// Derive the label and probability from a raw score.
    pub fn from_margin(margin: f64) -> Self {
        let probability = sigmoid(margin);
        let label = if probability >= DECISION_THRESHOLD {
            Attrition::Leaves
        } else {
            Attrition::Stays
        };
        Self {
            label,
            probability,
            margin,
        }
    }
}

/// Applies a [`LinearModel`] to scaled vectors.
///
/// Construction checks the model against the schema, so a model trained on a
/// different column set is rejected before any request is served.
#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    model: &'a LinearModel,
}

impl<'a> Predictor<'a> {
    /// Create a predictor for `model` over `schema`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] if the model does not have one weight per schema feature.
    pub fn new(model: &'a LinearModel, schema: &FeatureSchema) -> Result<Self, ConfigurationError> {
        ConfigurationError::check_len(Stage::Prediction, schema.len(), model.n_features())?;
        Ok(Self { model })
    }

    /// Raw score `bias + Σ weight[i] * x[i]`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] if `vector` has the wrong length.
    pub fn margin(&self, vector: &ScaledVector) -> Result<f64, ConfigurationError> {
        ConfigurationError::check_len(Stage::Prediction, self.model.n_features(), vector.len())?;
        Ok(self.model.margin(vector.view()))
    }

    /// Predict the class and probability for a scaled vector.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] if `vector` has the wrong length.
    pub fn predict(&self, vector: &ScaledVector) -> Result<PredictionResult, ConfigurationError> {
        self.margin(vector).map(PredictionResult::from_margin)
    }
}
