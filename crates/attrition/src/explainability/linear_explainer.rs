//! Linear SHAP explainer for linear models.
//!
//! SHAP values for linear models have a closed-form solution:
//! shap[i] = weight[i] * (x[i] - background[i])

use super::values::AttributionResult;
use super::Explainer;
use crate::dataset::FeatureSchema;
use crate::error::{ConfigurationError, Stage};
use crate::preprocess::{ScaledVector, Scaler};
use crate::repr::LinearModel;

/// Reference input that attributions are measured against.
///
/// Conventionally the scaled representation of the all-zero encoded vector.
/// Computed once per process and shared read-only by every request.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundPoint(ScaledVector);

impl BackgroundPoint {
    /// Use an explicit scaled vector as background.
    pub fn new(vector: ScaledVector) -> Self {
        Self(vector)
    }

    /// Scaled all-zero input: `-mean / scale` per feature.
    pub fn from_scaler(scaler: &Scaler) -> Self {
        Self(scaler.scale_zeros())
    }

    /// Number of features.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the background has no features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The background as a scaled vector.
    #[inline]
    pub fn vector(&self) -> &ScaledVector {
        &self.0
    }
}

/// Linear SHAP explainer for linear models.
///
/// Computes exact attributions in closed form.
#[derive(Debug, Clone, Copy)]
pub struct LinearExplainer<'a> {
    /// Reference to the linear model
    model: &'a LinearModel,
    /// Feature names for the attributions
    schema: &'a FeatureSchema,
    /// Baseline input
    background: &'a BackgroundPoint,
}

impl<'a> LinearExplainer<'a> {
    /// Create a new LinearExplainer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the model or background length
    /// doesn't match the schema.
    pub fn new(
        model: &'a LinearModel,
        schema: &'a FeatureSchema,
        background: &'a BackgroundPoint,
    ) -> Result<Self, ConfigurationError> {
        ConfigurationError::check_len(Stage::Attribution, schema.len(), model.n_features())?;
        ConfigurationError::check_len(Stage::Attribution, schema.len(), background.len())?;
        Ok(Self {
            model,
            schema,
            background,
        })
    }

    /// Get the expected value (base value).
    ///
    /// For linear models: `E[f(x)] = sum(w[i] * background[i]) + bias`
    pub fn base_value(&self) -> f64 {
        self.model.margin(self.background.vector().view())
    }

    /// Compute attributions for one scaled input.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `vector` has the wrong length.
    pub fn shap_values(&self, vector: &ScaledVector) -> Result<AttributionResult, ConfigurationError> {
        ConfigurationError::check_len(Stage::Attribution, self.schema.len(), vector.len())?;

        let weights = self.model.weights();
        let background = self.background.vector();

        // w[i] * (x[i] - background[i])
        let contributions = vector
            .iter()
            .zip(background.iter())
            .zip(weights.iter())
            .map(|((x, b), &w)| w * (x - b));

        Ok(AttributionResult::from_contributions(
            self.schema,
            contributions,
            self.base_value(),
        ))
    }
}

impl Explainer for LinearExplainer<'_> {
    fn expected_value(&self) -> f64 {
        self.base_value()
    }

    fn explain(&self, vector: &ScaledVector) -> Result<AttributionResult, ConfigurationError> {
        self.shap_values(vector)
    }
}
