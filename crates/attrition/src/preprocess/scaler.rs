//! Standardization with training-time parameters.
//!
//! `scaled[i] = (x[i] - mean[i]) / scale[i]`
//!
//! Parameters are validated once when the [`Scaler`] is built: a zero or
//! non-finite scale rejects the artifact set. After that the transform is
//! total except for length mismatches, which indicate artifact skew.

use ndarray::Array1;

use super::vector::{EncodedVector, ScaledVector};
use crate::dataset::FeatureSchema;
use crate::error::{ArtifactError, ArtifactKind, ConfigurationError, Stage};

/// Per-feature `(mean, scale)` pairs fit at training time.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingParameters {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl ScalingParameters {
    /// Create parameters from mean and scale vectors.
    ///
    /// # Errors
    ///
    /// [`ArtifactError::LengthMismatch`] if the two vectors differ in length.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        if mean.len() != scale.len() {
            return Err(ArtifactError::LengthMismatch {
                kind: ArtifactKind::Scaler,
                expected: mean.len(),
                actual: scale.len(),
            });
        }
        Ok(Self {
            mean: Array1::from(mean),
            scale: Array1::from(scale),
        })
    }

    /// Identity parameters: mean 0, scale 1.
    pub fn identity(n_features: usize) -> Self {
        Self {
            mean: Array1::zeros(n_features),
            scale: Array1::ones(n_features),
        }
    }

    /// Number of features.
    #[inline]
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// Returns `true` if there are no features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Training-time feature means.
    pub fn mean(&self) -> &[f64] {
        self.mean.as_slice().unwrap_or_default()
    }

    /// Training-time feature scales.
    pub fn scale(&self) -> &[f64] {
        self.scale.as_slice().unwrap_or_default()
    }
}

/// Validated standardization transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Scaler {
    params: ScalingParameters,
}

impl Scaler {
    /// Validate `params` against `schema`.
    ///
    /// # Errors
    ///
    /// - [`ArtifactError::LengthMismatch`] if the parameter count differs from the schema
    /// - [`ArtifactError::NonFinite`] for a non-finite mean
    /// - [`ArtifactError::DegenerateScale`] for a zero or non-finite scale
    pub fn new(params: ScalingParameters, schema: &FeatureSchema) -> Result<Self, ArtifactError> {
        if params.len() != schema.len() {
            return Err(ArtifactError::LengthMismatch {
                kind: ArtifactKind::Scaler,
                expected: schema.len(),
                actual: params.len(),
            });
        }

        for ((feature, &mean), &scale) in schema.iter().zip(&params.mean).zip(&params.scale) {
            if !mean.is_finite() {
                return Err(ArtifactError::NonFinite {
                    kind: ArtifactKind::Scaler,
                    feature: feature.to_owned(),
                    value: mean,
                });
            }
            if scale == 0.0 || !scale.is_finite() {
                return Err(ArtifactError::DegenerateScale {
                    feature: feature.to_owned(),
                    value: scale,
                });
            }
        }

        Ok(Self { params })
    }

    /// Number of features.
    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The validated parameters.
    pub fn params(&self) -> &ScalingParameters {
        &self.params
    }

    /// Standardize an encoded vector.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] if `vector` does not have one value per feature.
    pub fn scale(&self, vector: &EncodedVector) -> Result<ScaledVector, ConfigurationError> {
        ConfigurationError::check_len(Stage::Scaling, self.len(), vector.len())?;
        Ok(ScaledVector::new(self.transform(&vector.view().to_owned())))
    }

    /// Scaled representation of the all-zero encoded vector.
    ///
    /// This is the conventional attribution baseline.
    pub fn scale_zeros(&self) -> ScaledVector {
        ScaledVector::new(self.transform(&Array1::zeros(self.len())))
    }

    /// Invert [`scale`](Self::scale): `x = scaled * scale + mean`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError`] if `vector` does not have one value per feature.
    pub fn unscale(&self, vector: &ScaledVector) -> Result<EncodedVector, ConfigurationError> {
        ConfigurationError::check_len(Stage::Scaling, self.len(), vector.len())?;
        let restored = &vector.view() * &self.params.scale + &self.params.mean;
        Ok(EncodedVector::new(restored))
    }

    fn transform(&self, values: &Array1<f64>) -> Array1<f64> {
        (values - &self.params.mean) / &self.params.scale
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(["Age", "MonthlyIncome", "OverTime_Yes"]).unwrap()
    }

    fn scaler() -> Scaler {
        let params =
            ScalingParameters::new(vec![36.0, 6500.0, 0.25], vec![9.0, 4700.0, 0.5]).unwrap();
        Scaler::new(params, &schema()).unwrap()
    }

    #[test]
    fn standardizes_each_feature() {
        let scaled = scaler()
            .scale(&EncodedVector::from(vec![45.0, 1800.0, 1.0]))
            .unwrap();

        assert_abs_diff_eq!(scaled.get(0).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scaled.get(1).unwrap(), -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(scaled.get(2).unwrap(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn scale_zeros_is_negative_mean_over_scale() {
        let baseline = scaler().scale_zeros();
        assert_abs_diff_eq!(baseline.get(0).unwrap(), -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(baseline.get(2).unwrap(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn scale_zeros_matches_scaling_zero_vector() {
        let scaler = scaler();
        let via_scale = scaler.scale(&EncodedVector::zeros(3)).unwrap();
        assert_eq!(via_scale, scaler.scale_zeros());
    }

    #[test]
    fn unscale_inverts_scale() {
        let scaler = scaler();
        let original = EncodedVector::from(vec![27.0, 12_345.0, 0.0]);
        let restored = scaler.unscale(&scaler.scale(&original).unwrap()).unwrap();
        for (a, b) in original.iter().zip(restored.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn wrong_length_is_configuration_error() {
        let err = scaler().scale(&EncodedVector::zeros(2)).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::LengthMismatch {
                stage: Stage::Scaling,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn zero_scale_rejected_at_construction() {
        let params = ScalingParameters::new(vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 1.0]).unwrap();
        let err = Scaler::new(params, &schema()).unwrap_err();
        assert!(
            matches!(err, ArtifactError::DegenerateScale { ref feature, .. } if feature == "MonthlyIncome"),
            "got: {err:?}"
        );
    }

    #[test]
    fn nan_mean_rejected_at_construction() {
        let params = ScalingParameters::new(vec![f64::NAN, 0.0, 0.0], vec![1.0; 3]).unwrap();
        let err = Scaler::new(params, &schema()).unwrap_err();
        assert!(matches!(err, ArtifactError::NonFinite { .. }), "got: {err:?}");
    }

    #[test]
    fn parameter_count_must_match_schema() {
        let err = Scaler::new(ScalingParameters::identity(2), &schema()).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::LengthMismatch {
                kind: ArtifactKind::Scaler,
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn mean_and_scale_lengths_must_agree() {
        let err = ScalingParameters::new(vec![0.0; 3], vec![1.0; 2]).unwrap_err();
        assert!(matches!(err, ArtifactError::LengthMismatch { .. }));
    }
}
