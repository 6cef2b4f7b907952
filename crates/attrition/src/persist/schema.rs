//! Serialized artifact formats.
//!
//! These types mirror the runtime artifacts but carry no invariants; they are
//! validated when converted (see `convert`). Field aliases accept the
//! attribute names scikit-learn uses for the same quantities, in the shapes
//! `tolist()` exports them.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered feature names (`columns.json`): a bare JSON array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureNamesSchema(pub Vec<String>);

/// Standardization parameters (`scaler.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalerSchema {
    #[serde(alias = "mean_")]
    pub mean: Vec<f64>,
    #[serde(alias = "scale_")]
    pub scale: Vec<f64>,
}

/// Linear classifier coefficients (`model.json`).
///
/// `weights` is also read as a single-row matrix (`coef_` of a binary
/// classifier) and `bias` as a one-element list (`intercept_`). Written
/// documents always use the flat form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinearModelSchema {
    #[serde(alias = "coef", alias = "coef_", deserialize_with = "weights_row")]
    pub weights: Vec<f64>,
    #[serde(alias = "intercept", alias = "intercept_", deserialize_with = "scalar_or_single")]
    pub bias: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Weights {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Bias {
    Scalar(f64),
    List(Vec<f64>),
}

fn weights_row<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    match Weights::deserialize(deserializer)? {
        Weights::Flat(weights) => Ok(weights),
        Weights::Rows(mut rows) if rows.len() == 1 => Ok(rows.remove(0)),
        Weights::Rows(rows) => Err(D::Error::custom(format!(
            "expected one row of weights, got {}",
            rows.len()
        ))),
    }
}

fn scalar_or_single<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Bias::deserialize(deserializer)? {
        Bias::Scalar(bias) => Ok(bias),
        Bias::List(values) => match values.as_slice() {
            [bias] => Ok(*bias),
            _ => Err(D::Error::custom(format!(
                "expected a single intercept, got {}",
                values.len()
            ))),
        },
    }
}

/// All three artifacts in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactBundleSchema {
    pub feature_names: FeatureNamesSchema,
    pub scaler: ScalerSchema,
    pub model: LinearModelSchema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaler_accepts_sklearn_names() {
        let schema: ScalerSchema =
            serde_json::from_str(r#"{"mean_": [1.0, 2.0], "scale_": [0.5, 4.0]}"#).unwrap();
        assert_eq!(schema.mean, vec![1.0, 2.0]);
        assert_eq!(schema.scale, vec![0.5, 4.0]);
    }

    #[test]
    fn model_accepts_coef_and_intercept() {
        let schema: LinearModelSchema =
            serde_json::from_str(r#"{"coef": [0.5, -0.2], "intercept": 0.1}"#).unwrap();
        assert_eq!(schema.weights, vec![0.5, -0.2]);
        assert_eq!(schema.bias, 0.1);
    }

    #[test]
    fn model_accepts_sklearn_export_shapes() {
        let schema: LinearModelSchema =
            serde_json::from_str(r#"{"coef_": [[0.5, -0.2]], "intercept_": [0.1]}"#).unwrap();
        assert_eq!(schema.weights, vec![0.5, -0.2]);
        assert_eq!(schema.bias, 0.1);
    }

    #[test]
    fn model_writes_flat_form() {
        let schema = LinearModelSchema {
            weights: vec![0.5, -0.2],
            bias: 0.1,
        };
        assert_eq!(
            serde_json::to_string(&schema).unwrap(),
            r#"{"weights":[0.5,-0.2],"bias":0.1}"#
        );
    }

    #[test]
    fn multiclass_coefficients_rejected() {
        let result: Result<LinearModelSchema, _> =
            serde_json::from_str(r#"{"coef_": [[0.5], [-0.2]], "intercept_": [0.1, 0.2]}"#);
        assert!(result.unwrap_err().to_string().contains("one row"));
    }

    #[test]
    fn multiple_intercepts_rejected() {
        let result: Result<LinearModelSchema, _> =
            serde_json::from_str(r#"{"coef_": [[0.5]], "intercept_": [0.1, 0.2]}"#);
        assert!(result.unwrap_err().to_string().contains("single intercept"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<LinearModelSchema, _> =
            serde_json::from_str(r#"{"weights": [], "bias": 0.0, "classes": [0, 1]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn feature_names_is_bare_array() {
        let names: FeatureNamesSchema = serde_json::from_str(r#"["Age", "OverTime_Yes"]"#).unwrap();
        assert_eq!(names.0, vec!["Age", "OverTime_Yes"]);
        assert_eq!(serde_json::to_string(&names).unwrap(), r#"["Age","OverTime_Yes"]"#);
    }
}
