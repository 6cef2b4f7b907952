//! Explainability module.
//!
//! Attributes a prediction to the individual input features.
//!
//! The attrition model is linear in its scaled inputs, so attributions have a
//! closed form ([`LinearExplainer`]):
//!
//! ```text
//! attribution[i]  = weight[i] * (x[i] - background[i])
//! expected_value  = bias + Σ weight[i] * background[i]
//! expected_value + Σ attribution[i] == bias + Σ weight[i] * x[i]
//! ```
//!
//! A non-linear model needs a different method; the [`Explainer`] trait is the
//! seam it plugs into.
//!
//! # Example
//!
//! ```
//! use attrition::dataset::FeatureSchema;
//! use attrition::explainability::{BackgroundPoint, Explainer, LinearExplainer};
//! use attrition::preprocess::ScaledVector;
//! use attrition::repr::LinearModel;
//!
//! let schema = FeatureSchema::new(["a", "b"]).unwrap();
//! let model = LinearModel::new(vec![0.5, -0.2], 0.1);
//! let background = BackgroundPoint::new(ScaledVector::zeros(2));
//!
//! let explainer = LinearExplainer::new(&model, &schema, &background).unwrap();
//! let result = explainer.explain(&ScaledVector::from(vec![1.0, 0.0])).unwrap();
//!
//! assert_eq!(result.top_k(1)[0].feature, "a");
//! assert!(result.verify(0.6, 1e-12));
//! ```

mod linear_explainer;
mod values;

pub use linear_explainer::{BackgroundPoint, LinearExplainer};
pub use values::{AttributionResult, FeatureAttribution};

use crate::error::ConfigurationError;
use crate::preprocess::ScaledVector;

/// Attribution method over scaled inputs.
pub trait Explainer {
    /// Model output at the background point.
    fn expected_value(&self) -> f64;

    /// Attribute one scaled input to its features.
    fn explain(&self, vector: &ScaledVector) -> Result<AttributionResult, ConfigurationError>;
}
