//! Attribution results.
//!
//! Stores one signed contribution per schema feature, ranked by magnitude,
//! together with the model output at the background point.

use serde::{Deserialize, Serialize};

use crate::dataset::FeatureSchema;

/// Contribution of a single feature to one prediction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureAttribution {
    /// Schema column name.
    pub feature: String,
    /// Schema position.
    pub index: usize,
    /// Signed contribution to the raw score.
    pub value: f64,
}

/// Per-feature attributions for one prediction.
///
/// Attributions are kept sorted by `|value|` descending; features with equal
/// magnitude stay in schema order.
///
/// Local accuracy: `expected_value + Σ value == margin` of the same input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributionResult {
    /// Model output at the background point.
    expected_value: f64,
    /// Ranked attributions, one per schema feature.
    attributions: Vec<FeatureAttribution>,
}

impl AttributionResult {
    /// Build a ranked result from contributions in schema order.
    ///
    /// `contributions` must yield one value per schema feature.
    pub fn from_contributions(
        schema: &FeatureSchema,
        contributions: impl IntoIterator<Item = f64>,
        expected_value: f64,
    ) -> Self {
        let mut attributions: Vec<FeatureAttribution> = schema
            .iter()
            .zip(contributions)
            .enumerate()
            .map(|(index, (feature, value))| FeatureAttribution {
                feature: feature.to_owned(),
                index,
                value,
            })
            .collect();

        // `sort_by` is stable: ties keep schema order.
        attributions.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));

        Self {
            expected_value,
            attributions,
        }
    }

    /// Model output at the background point.
    #[inline]
    pub fn expected_value(&self) -> f64 {
        self.expected_value
    }

    /// Number of attributed features.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributions.len()
    }

    /// Returns `true` if there are no attributions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributions.is_empty()
    }

    /// All attributions, ranked.
    #[inline]
    pub fn ranked(&self) -> &[FeatureAttribution] {
        &self.attributions
    }

    /// The `k` most influential features (fewer if the schema is smaller).
    pub fn top_k(&self, k: usize) -> &[FeatureAttribution] {
        &self.attributions[..k.min(self.attributions.len())]
    }

    /// Attributions in schema order.
    pub fn in_schema_order(&self) -> Vec<&FeatureAttribution> {
        let mut ordered: Vec<_> = self.attributions.iter().collect();
        ordered.sort_by_key(|a| a.index);
        ordered
    }

    /// Attribution of a feature by name.
    pub fn get(&self, feature: &str) -> Option<f64> {
        self.attributions
            .iter()
            .find(|a| a.feature == feature)
            .map(|a| a.value)
    }

    /// Sum of all attributions, accumulated in schema order.
    pub fn total(&self) -> f64 {
        self.in_schema_order().iter().map(|a| a.value).sum()
    }

    /// `expected_value + Σ attribution`: the explained raw score.
    pub fn explained_margin(&self) -> f64 {
        self.expected_value + self.total()
    }

    /// Verify local accuracy against the model's raw score.
    pub fn verify(&self, margin: f64, tolerance: f64) -> bool {
        (self.explained_margin() - margin).abs() <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(["a", "b", "c", "d"]).unwrap()
    }

    #[test]
    fn ranks_by_magnitude() {
        let result = AttributionResult::from_contributions(&schema(), [0.1, -0.7, 0.3, 0.0], 0.5);
        let order: Vec<_> = result.ranked().iter().map(|a| a.feature.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a", "d"]);
        assert_eq!(result.ranked()[0].index, 1);
        assert_eq!(result.ranked()[0].value, -0.7);
    }

    #[test]
    fn ties_keep_schema_order() {
        let result = AttributionResult::from_contributions(&schema(), [0.2, -0.5, -0.2, 0.5], 0.0);
        let order: Vec<_> = result.ranked().iter().map(|a| a.index).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn top_k_clamps_to_len() {
        let result = AttributionResult::from_contributions(&schema(), [1.0, 2.0, 3.0, 4.0], 0.0);
        assert_eq!(result.top_k(2).len(), 2);
        assert_eq!(result.top_k(2)[0].feature, "d");
        assert_eq!(result.top_k(10).len(), 4);
        assert!(result.top_k(0).is_empty());
    }

    #[test]
    fn schema_order_and_lookup() {
        let result = AttributionResult::from_contributions(&schema(), [0.1, -0.7, 0.3, 0.0], 0.5);
        let names: Vec<_> = result.in_schema_order().iter().map(|a| a.feature.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
        assert_eq!(result.get("c"), Some(0.3));
        assert_eq!(result.get("z"), None);
    }

    #[test]
    fn verify_checks_local_accuracy() {
        // 0.5 + 1.0 + 2.0 + 0.0 + 0.0 = 3.5
        let result = AttributionResult::from_contributions(&schema(), [1.0, 2.0, 0.0, 0.0], 0.5);
        assert_eq!(result.explained_margin(), 3.5);
        assert!(result.verify(3.5, 1e-12));
        assert!(!result.verify(5.0, 1e-12));
    }
}
