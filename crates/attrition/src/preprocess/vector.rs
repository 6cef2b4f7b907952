//! Schema-indexed feature vectors.
//!
//! A [`FeatureVector`] is tagged with the pipeline stage that produced it, so
//! an unscaled vector cannot be handed to the predictor by mistake.

use std::marker::PhantomData;

use ndarray::{Array1, ArrayView1};

/// Stage marker: output of the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encoded;

/// Stage marker: output of the scaler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scaled;

/// Dense vector of feature values in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector<S> {
    values: Array1<f64>,
    _stage: PhantomData<S>,
}

/// Encoder output: one value per schema column, unseen columns zero.
pub type EncodedVector = FeatureVector<Encoded>;

/// Scaler output: `(x - mean) / scale` per column.
pub type ScaledVector = FeatureVector<Scaled>;

impl<S> FeatureVector<S> {
    /// Wrap an array of values.
    pub fn new(values: Array1<f64>) -> Self {
        Self {
            values,
            _stage: PhantomData,
        }
    }

    /// Vector of zeros.
    pub fn zeros(len: usize) -> Self {
        Self::new(Array1::zeros(len))
    }

    /// Number of features.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the vector has no features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a schema position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Read-only view of the values.
    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Iterate over values in schema order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Copy the values into a `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    /// Unwrap the underlying array.
    pub fn into_inner(self) -> Array1<f64> {
        self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut Array1<f64> {
        &mut self.values
    }
}

impl<S> From<Vec<f64>> for FeatureVector<S> {
    fn from(values: Vec<f64>) -> Self {
        Self::new(Array1::from(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_requested_len() {
        let v = EncodedVector::zeros(4);
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|x| x == 0.0));
        assert_eq!(v.get(4), None);
    }

    #[test]
    fn from_vec_keeps_order() {
        let v = ScaledVector::from(vec![1.0, -2.0, 3.5]);
        assert_eq!(v.to_vec(), vec![1.0, -2.0, 3.5]);
        assert_eq!(v.get(1), Some(-2.0));
    }
}
