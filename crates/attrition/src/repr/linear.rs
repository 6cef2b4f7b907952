//! Linear model data structure.

use ndarray::{Array1, ArrayView1};

/// Binary linear classifier (weights + bias).
///
/// One weight per schema feature; the raw score (margin) of an input `x` is
/// `bias + Σ weight[i] * x[i]`.
///
/// # Example
///
/// ```
/// use attrition::repr::LinearModel;
///
/// let model = LinearModel::new(vec![0.5, -0.2], 0.1);
///
/// assert_eq!(model.n_features(), 2);
/// assert_eq!(model.weight(1), -0.2);
/// assert_eq!(model.bias(), 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    /// Coefficients in schema order.
    weights: Array1<f64>,

    /// Intercept.
    bias: f64,
}

impl LinearModel {
    /// Create a model from weights and bias.
    pub fn new(weights: impl Into<Array1<f64>>, bias: f64) -> Self {
        Self {
            weights: weights.into(),
            bias,
        }
    }

    /// Create a zero-initialized model.
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features),
            bias: 0.0,
        }
    }

    /// Number of input features.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Weight for a feature.
    #[inline]
    pub fn weight(&self, feature: usize) -> f64 {
        debug_assert!(feature < self.n_features(), "feature index out of bounds");
        self.weights[feature]
    }

    /// Intercept.
    #[inline]
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// All weights in schema order.
    #[inline]
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    /// Raw score `bias + w · x`.
    ///
    /// Callers are responsible for `x` having `n_features` entries.
    #[inline]
    pub fn margin(&self, x: ArrayView1<'_, f64>) -> f64 {
        debug_assert_eq!(x.len(), self.n_features(), "feature count mismatch");
        self.bias + self.weights.dot(&x)
    }
}
