//! Testing utilities shared by unit and integration tests.
//!
//! ```
//! use attrition::testing::{assert_slice_approx_eq, scenario_model, DEFAULT_TOLERANCE};
//! use attrition::dataset::RawRecord;
//!
//! let model = scenario_model();
//! let scaled = model.scale(&RawRecord::new().with("a", 1.0)).unwrap();
//! assert_slice_approx_eq(&scaled.to_vec(), &[1.0, 0.0], DEFAULT_TOLERANCE);
//! ```

use std::path::PathBuf;

use approx::AbsDiffEq;

use crate::dataset::{FeatureSchema, RawRecord};
use crate::model::{AttritionModel, PipelineConfig};
use crate::persist::ArtifactSet;
use crate::preprocess::{Scaler, ScalingParameters};
use crate::repr::LinearModel;

// =============================================================================
// Constants
// =============================================================================

/// Tolerance for scaling round trips and exact arithmetic.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Tolerance for local accuracy of attributions.
pub const ATTRIBUTION_TOLERANCE: f64 = 1e-6;

// =============================================================================
// Assertions
// =============================================================================

/// Assert two slices are element-wise equal within `tolerance`.
///
/// # Panics
///
/// Panics with the first differing index if lengths or values disagree.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            a.abs_diff_eq(e, tolerance),
            "index {i}: {a} vs {e} (tolerance {tolerance})"
        );
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Two-feature artifact set: weights `[0.5, -0.2]`, bias `0.1`, identity scaling.
pub fn scenario_artifacts() -> ArtifactSet {
    let schema = FeatureSchema::new(["a", "b"]).expect("valid schema");
    let scaler = Scaler::new(
        ScalingParameters::new(vec![0.0, 0.0], vec![1.0, 1.0]).expect("valid parameters"),
        &schema,
    )
    .expect("valid scaler");
    let model = LinearModel::new(vec![0.5, -0.2], 0.1);
    ArtifactSet::from_parts(schema, scaler, model)
}

/// [`AttritionModel`] over [`scenario_artifacts`].
pub fn scenario_model() -> AttritionModel {
    AttritionModel::from_artifacts(scenario_artifacts(), PipelineConfig::default())
        .expect("valid scenario artifacts")
}

/// Directory with the 50-column employee artifacts.
pub fn employee_artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases/artifacts/employee")
}

/// [`AttritionModel`] over the employee artifacts.
pub fn employee_model(config: PipelineConfig) -> AttritionModel {
    AttritionModel::load_dir(employee_artifacts_dir(), config).expect("employee artifacts load")
}

/// An employee with every collected attribute filled in.
pub fn employee_record() -> RawRecord {
    RawRecord::new()
        .with("Age", 29)
        .with("DistanceFromHome", 12)
        .with("MonthlyIncome", 3200)
        .with("HourlyRate", 58)
        .with("DailyRate", 640)
        .with("MonthlyRate", 11200)
        .with("JobLevel", 1)
        .with("Education", 3)
        .with("JobSatisfaction", 2)
        .with("WorkLifeBalance", 3)
        .with("EnvironmentSatisfaction", 2)
        .with("RelationshipSatisfaction", 3)
        .with("JobInvolvement", 3)
        .with("NumCompaniesWorked", 4)
        .with("PercentSalaryHike", 12)
        .with("PerformanceRating", 3)
        .with("TrainingTimesLastYear", 2)
        .with("TotalWorkingYears", 6)
        .with("YearsAtCompany", 2)
        .with("YearsInCurrentRole", 1)
        .with("YearsSinceLastPromotion", 1)
        .with("YearsWithCurrManager", 1)
        .with("BusinessTravel", "Travel_Frequently")
        .with("Department", "Sales")
        .with("EducationField", "Marketing")
        .with("Gender", "Male")
        .with("JobRole", "Sales Representative")
        .with("MaritalStatus", "Single")
        .with("OverTime", "Yes")
}
