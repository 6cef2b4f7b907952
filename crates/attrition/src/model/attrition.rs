//! Attrition pipeline facade.
//!
//! Owns the validated artifacts for the process lifetime and runs records
//! through encoder, scaler, predictor and attributor.

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::PipelineConfig;
use crate::dataset::{FeatureSchema, RawRecord};
use crate::error::{ConfigurationError, Error, Stage};
use crate::explainability::{AttributionResult, BackgroundPoint, Explainer, FeatureAttribution, LinearExplainer};
use crate::inference::{PredictionResult, Predictor};
use crate::persist::ArtifactSet;
use crate::preprocess::{encode, EncodedVector, ScaledVector, Scaler};
use crate::repr::LinearModel;
use crate::utils::run_with_threads;

/// Prediction and attribution for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub prediction: PredictionResult,
    pub attribution: AttributionResult,
    /// Number of attributions surfaced by [`top_features`](Self::top_features).
    pub top_k: usize,
}

impl Assessment {
    /// The most influential features, at most `top_k` of them.
    pub fn top_features(&self) -> &[FeatureAttribution] {
        self.attribution.top_k(self.top_k)
    }
}

/// Employee attrition model with attributions.
///
/// Construction validates that scaler, weights and background agree with the
/// schema; afterwards every operation is a pure function of its input.
///
/// # Example
///
/// ```
/// use attrition::dataset::{FeatureSchema, RawRecord};
/// use attrition::inference::Attrition;
/// use attrition::model::{AttritionModel, PipelineConfig};
/// use attrition::preprocess::{Scaler, ScalingParameters};
/// use attrition::repr::LinearModel;
///
/// let schema = FeatureSchema::new(["Age", "OverTime_Yes"]).unwrap();
/// let scaler = Scaler::new(ScalingParameters::identity(2), &schema).unwrap();
/// let model = LinearModel::new(vec![-0.05, 2.0], 0.5);
/// let pipeline = AttritionModel::new(schema, scaler, model, PipelineConfig::default()).unwrap();
///
/// let record = RawRecord::new().with("Age", 20.0).with("OverTime", "Yes");
/// let assessment = pipeline.assess(&record).unwrap();
/// assert_eq!(assessment.prediction.label, Attrition::Leaves);
/// assert_eq!(assessment.top_features()[0].feature, "OverTime_Yes");
/// ```
#[derive(Debug, Clone)]
pub struct AttritionModel {
    schema: FeatureSchema,
    scaler: Scaler,
    model: LinearModel,
    background: BackgroundPoint,
    config: PipelineConfig,
}

impl AttritionModel {
    /// Assemble a pipeline from validated components.
    ///
    /// The background point is the scaled all-zero input.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `config` is invalid
    /// - [`Error::Configuration`] if scaler or model length differs from the schema
    pub fn new(
        schema: FeatureSchema,
        scaler: Scaler,
        model: LinearModel,
        config: PipelineConfig,
    ) -> Result<Self, Error> {
        config.validate()?;
        ConfigurationError::check_len(Stage::Scaling, schema.len(), scaler.len())?;
        Predictor::new(&model, &schema)?;

        let background = BackgroundPoint::from_scaler(&scaler);
        LinearExplainer::new(&model, &schema, &background)?;

        Ok(Self {
            schema,
            scaler,
            model,
            background,
            config,
        })
    }

    /// Build from a loaded artifact set.
    pub fn from_artifacts(artifacts: ArtifactSet, config: PipelineConfig) -> Result<Self, Error> {
        let (schema, scaler, model) = artifacts.into_parts();
        Self::new(schema, scaler, model, config)
    }

    /// Load `columns.json`, `scaler.json` and `model.json` from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>, config: PipelineConfig) -> Result<Self, Error> {
        Self::from_artifacts(ArtifactSet::load_dir(dir)?, config)
    }

    /// Load a single artifact bundle document.
    pub fn load_bundle(path: impl AsRef<Path>, config: PipelineConfig) -> Result<Self, Error> {
        Self::from_artifacts(ArtifactSet::load_bundle(path)?, config)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn linear(&self) -> &LinearModel {
        &self.model
    }

    pub fn background(&self) -> &BackgroundPoint {
        &self.background
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replace the runtime configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Result<Self, Error> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Model output at the background point.
    pub fn expected_value(&self) -> f64 {
        self.model.margin(self.background.vector().view())
    }

    // =========================================================================
    // Pipeline stages
    // =========================================================================

    /// Encode a raw record against the schema.
    pub fn encode(&self, record: &RawRecord) -> EncodedVector {
        encode(record, &self.schema)
    }

    /// Encode and standardize a raw record.
    pub fn scale(&self, record: &RawRecord) -> Result<ScaledVector, ConfigurationError> {
        self.scaler.scale(&self.encode(record))
    }

    /// Predict attrition for a raw record.
    pub fn predict(&self, record: &RawRecord) -> Result<PredictionResult, ConfigurationError> {
        let scaled = self.scale(record)?;
        Predictor::new(&self.model, &self.schema)?.predict(&scaled)
    }

    /// Attribute the prediction for a raw record.
    pub fn explain(&self, record: &RawRecord) -> Result<AttributionResult, ConfigurationError> {
        let scaled = self.scale(record)?;
        self.explainer()?.explain(&scaled)
    }

    /// Prediction and attribution for one record, sharing the scaled input.
    pub fn assess(&self, record: &RawRecord) -> Result<Assessment, ConfigurationError> {
        let scaled = self.scale(record)?;
        let prediction = Predictor::new(&self.model, &self.schema)?.predict(&scaled)?;
        let attribution = self.explainer()?.explain(&scaled)?;

        debug!(
            "assessed record with {} attributes: {} (p = {:.4})",
            record.len(),
            prediction.label,
            prediction.probability
        );

        Ok(Assessment {
            prediction,
            attribution,
            top_k: self.config.top_k,
        })
    }

    /// Assess independent records, in parallel unless `n_threads == 1`.
    ///
    /// Output order matches input order.
    pub fn assess_batch(&self, records: &[RawRecord]) -> Result<Vec<Assessment>, ConfigurationError> {
        debug!(
            "assessing {} records (n_threads = {})",
            records.len(),
            self.config.n_threads
        );
        run_with_threads(self.config.n_threads, |parallelism| {
            parallelism
                .maybe_par_map(records, |record| self.assess(record))
                .into_iter()
                .collect()
        })
    }

    fn explainer(&self) -> Result<LinearExplainer<'_>, ConfigurationError> {
        LinearExplainer::new(&self.model, &self.schema, &self.background)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::inference::Attrition;
    use crate::preprocess::ScalingParameters;

    fn pipeline(config: PipelineConfig) -> AttritionModel {
        let schema = FeatureSchema::new(["Age", "OverTime_No", "OverTime_Yes"]).unwrap();
        let params = ScalingParameters::new(vec![35.0, 0.7, 0.3], vec![10.0, 0.5, 0.5]).unwrap();
        let scaler = Scaler::new(params, &schema).unwrap();
        let model = LinearModel::new(vec![-0.4, -0.5, 0.5], -1.0);
        AttritionModel::new(schema, scaler, model, config).unwrap()
    }

    #[test]
    fn rejects_model_length_mismatch() {
        let schema = FeatureSchema::new(["a", "b", "c"]).unwrap();
        let scaler = Scaler::new(ScalingParameters::identity(3), &schema).unwrap();
        let model = LinearModel::zeros(2);
        let err = AttritionModel::new(schema, scaler, model, PipelineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::LengthMismatch {
                stage: Stage::Prediction,
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = PipelineConfig {
            top_k: 0,
            n_threads: 0,
        };
        let schema = FeatureSchema::new(["a"]).unwrap();
        let scaler = Scaler::new(ScalingParameters::identity(1), &schema).unwrap();
        let err = AttritionModel::new(schema, scaler, LinearModel::zeros(1), config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn background_is_scaled_zero_input() {
        let model = pipeline(PipelineConfig::default());
        assert_eq!(model.background().vector().to_vec(), vec![-3.5, -1.4, -0.6]);
    }

    #[test]
    fn assess_is_locally_accurate() {
        let model = pipeline(PipelineConfig::default());
        let record = RawRecord::new().with("Age", 25.0).with("OverTime", "Yes");
        let assessment = model.assess(&record).unwrap();

        assert_eq!(assessment.attribution.len(), 3);
        assert!(assessment
            .attribution
            .verify(assessment.prediction.margin, 1e-9));
        assert_abs_diff_eq!(
            assessment.attribution.expected_value(),
            model.expected_value(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn overtime_raises_probability() {
        let model = pipeline(PipelineConfig::default());
        let base = RawRecord::new().with("Age", 30.0);
        let no = model.predict(&base.clone().with("OverTime", "No")).unwrap();
        let yes = model.predict(&base.with("OverTime", "Yes")).unwrap();
        assert!(yes.probability > no.probability);
    }

    #[test]
    fn top_features_respects_config() {
        let config = PipelineConfig::builder().top_k(2).build().unwrap();
        let model = pipeline(config);
        let record = RawRecord::new().with("Age", 60.0).with("OverTime", "Yes");
        let assessment = model.assess(&record).unwrap();
        assert_eq!(assessment.top_features().len(), 2);
        assert_eq!(assessment.attribution.ranked().len(), 3);
    }

    #[test]
    fn batch_matches_single_assessments() {
        let records: Vec<RawRecord> = (0..16i32)
            .map(|i| {
                RawRecord::new()
                    .with("Age", 20.0 + f64::from(i))
                    .with("OverTime", if i % 2 == 0 { "Yes" } else { "No" })
            })
            .collect();

        for n_threads in [0, 1, 3] {
            let config = PipelineConfig::builder().n_threads(n_threads).build().unwrap();
            let model = pipeline(config);
            let batch = model.assess_batch(&records).unwrap();
            let single: Vec<_> = records.iter().map(|r| model.assess(r).unwrap()).collect();
            assert_eq!(batch, single, "n_threads = {n_threads}");
        }
    }

    #[test]
    fn young_overtime_employee_leaves() {
        let model = pipeline(PipelineConfig::default());
        let record = RawRecord::new().with("Age", 18.0).with("OverTime", "Yes");
        assert_eq!(model.predict(&record).unwrap().label, Attrition::Leaves);
    }
}
