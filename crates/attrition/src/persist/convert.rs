//! Conversion between serialized artifacts and runtime types.
//!
//! Deserialization into runtime types is fallible (`TryFrom`) and performs all
//! structural validation; serialization is lossless (`From`).

use super::artifacts::ArtifactSet;
use super::schema::{ArtifactBundleSchema, FeatureNamesSchema, LinearModelSchema, ScalerSchema};
use crate::dataset::FeatureSchema;
use crate::error::{ArtifactError, ArtifactKind};
use crate::preprocess::{Scaler, ScalingParameters};
use crate::repr::LinearModel;

// =============================================================================
// Schema -> runtime
// =============================================================================

impl TryFrom<FeatureNamesSchema> for FeatureSchema {
    type Error = ArtifactError;

    fn try_from(schema: FeatureNamesSchema) -> Result<Self, Self::Error> {
        FeatureSchema::new(schema.0)
    }
}

/// Validate serialized scaling parameters against the feature schema.
pub(crate) fn scaler_from_schema(
    schema: ScalerSchema,
    features: &FeatureSchema,
) -> Result<Scaler, ArtifactError> {
    check_len(ArtifactKind::Scaler, features, schema.mean.len())?;
    check_len(ArtifactKind::Scaler, features, schema.scale.len())?;
    let params = ScalingParameters::new(schema.mean, schema.scale)?;
    Scaler::new(params, features)
}

/// Validate serialized model weights against the feature schema.
pub(crate) fn model_from_schema(
    schema: LinearModelSchema,
    features: &FeatureSchema,
) -> Result<LinearModel, ArtifactError> {
    check_len(ArtifactKind::Model, features, schema.weights.len())?;

    if let Some((feature, &value)) = features
        .iter()
        .zip(&schema.weights)
        .find(|(_, w)| !w.is_finite())
    {
        return Err(ArtifactError::NonFinite {
            kind: ArtifactKind::Model,
            feature: feature.to_owned(),
            value,
        });
    }
    if !schema.bias.is_finite() {
        return Err(ArtifactError::NonFinite {
            kind: ArtifactKind::Model,
            feature: "bias".to_owned(),
            value: schema.bias,
        });
    }

    Ok(LinearModel::new(schema.weights, schema.bias))
}

fn check_len(kind: ArtifactKind, features: &FeatureSchema, actual: usize) -> Result<(), ArtifactError> {
    if actual == features.len() {
        Ok(())
    } else {
        Err(ArtifactError::LengthMismatch {
            kind,
            expected: features.len(),
            actual,
        })
    }
}

impl TryFrom<ArtifactBundleSchema> for ArtifactSet {
    type Error = ArtifactError;

    fn try_from(bundle: ArtifactBundleSchema) -> Result<Self, Self::Error> {
        let schema = FeatureSchema::try_from(bundle.feature_names)?;
        let scaler = scaler_from_schema(bundle.scaler, &schema)?;
        let model = model_from_schema(bundle.model, &schema)?;
        Ok(ArtifactSet::from_parts(schema, scaler, model))
    }
}

// =============================================================================
// Runtime -> schema
// =============================================================================

impl From<&FeatureSchema> for FeatureNamesSchema {
    fn from(schema: &FeatureSchema) -> Self {
        Self(schema.names().to_vec())
    }
}

impl From<&Scaler> for ScalerSchema {
    fn from(scaler: &Scaler) -> Self {
        Self {
            mean: scaler.params().mean().to_vec(),
            scale: scaler.params().scale().to_vec(),
        }
    }
}

impl From<&LinearModel> for LinearModelSchema {
    fn from(model: &LinearModel) -> Self {
        Self {
            weights: model.weights().to_vec(),
            bias: model.bias(),
        }
    }
}

impl From<&ArtifactSet> for ArtifactBundleSchema {
    fn from(set: &ArtifactSet) -> Self {
        Self {
            feature_names: set.schema().into(),
            scaler: set.scaler().into(),
            model: set.model().into(),
        }
    }
}
