//! Artifact loading and validation-failure tests.

use std::io::Cursor;
use std::path::Path;

use serde_json::{json, Value};

use attrition::error::{ArtifactError, ArtifactKind};
use attrition::model::{AttritionModel, PipelineConfig};
use attrition::persist::{ArtifactSet, MODEL_FILE, SCALER_FILE, SCHEMA_FILE};
use attrition::testing::{employee_artifacts_dir, employee_record, scenario_artifacts};
use attrition::Error;

fn load_fixture_value(file: &str) -> Value {
    let path = employee_artifacts_dir().join(file);
    let bytes = std::fs::read(&path).expect("read fixture");
    serde_json::from_slice(&bytes).expect("parse fixture json")
}

/// Write the employee fixture into `dir`, replacing `file` with `value`.
fn write_mutated(dir: &Path, file: &str, value: &Value) {
    for name in [SCHEMA_FILE, SCALER_FILE, MODEL_FILE] {
        let content = if name == file {
            value.clone()
        } else {
            load_fixture_value(name)
        };
        std::fs::write(dir.join(name), serde_json::to_vec(&content).unwrap()).unwrap();
    }
}

fn load_mutated_err(file: &str, value: Value) -> ArtifactError {
    let dir = tempfile::tempdir().unwrap();
    write_mutated(dir.path(), file, &value);
    ArtifactSet::load_dir(dir.path()).expect_err("expected error")
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn employee_fixture_loads_with_sklearn_field_names() {
    let set = ArtifactSet::load_dir(employee_artifacts_dir()).unwrap();
    assert_eq!(set.schema().len(), 50);
    assert_eq!(set.scaler().len(), 50);
    assert_eq!(set.model().n_features(), 50);
    assert_eq!(set.schema().name(0), Some("Age"));
}

#[test]
fn bundle_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bundle.json");

    let original = ArtifactSet::load_dir(employee_artifacts_dir()).unwrap();
    original
        .write_json(std::fs::File::create(&path).unwrap())
        .unwrap();

    let reloaded = ArtifactSet::load_bundle(&path).unwrap();
    assert_eq!(reloaded, original);

    let from_dir = AttritionModel::load_dir(employee_artifacts_dir(), PipelineConfig::default()).unwrap();
    let from_bundle = AttritionModel::load_bundle(&path, PipelineConfig::default()).unwrap();
    assert_eq!(
        from_dir.assess(&employee_record()).unwrap(),
        from_bundle.assess(&employee_record()).unwrap()
    );
}

#[test]
fn save_dir_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let original = scenario_artifacts();
    original.save_dir(dir.path()).unwrap();

    for name in [SCHEMA_FILE, SCALER_FILE, MODEL_FILE] {
        assert!(dir.path().join(name).is_file(), "{name} missing");
    }
    assert_eq!(ArtifactSet::load_dir(dir.path()).unwrap(), original);
}

#[test]
fn bundle_accepts_sklearn_coefficient_shapes() {
    let doc = json!({
        "feature_names": ["a", "b"],
        "scaler": {"mean_": [0.0, 0.0], "scale_": [1.0, 1.0]},
        "model": {"coef_": [[0.5, -0.2]], "intercept_": [0.1]}
    });
    let bytes = serde_json::to_vec(&doc).unwrap();
    let set = ArtifactSet::read_json(Cursor::new(bytes)).unwrap();
    assert_eq!(set.model().n_features(), 2);
    assert_eq!(set.model().bias(), 0.1);
}

#[test]
fn missing_model_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    scenario_artifacts().save_dir(dir.path()).unwrap();
    std::fs::remove_file(dir.path().join(MODEL_FILE)).unwrap();

    let err = AttritionModel::load_dir(dir.path(), PipelineConfig::default()).unwrap_err();
    assert!(
        matches!(
            err,
            Error::Artifact(ArtifactError::Io {
                kind: ArtifactKind::Model,
                ..
            })
        ),
        "got: {err:?}"
    );
}

// =============================================================================
// Validation failures
// =============================================================================

#[test]
fn validation_fails_on_empty_schema() {
    let err = load_mutated_err(SCHEMA_FILE, json!([]));
    assert!(matches!(err, ArtifactError::Empty(ArtifactKind::Schema)), "got: {err:?}");
}

#[test]
fn validation_fails_on_duplicate_feature() {
    let mut v = load_fixture_value(SCHEMA_FILE);
    v.as_array_mut().expect("schema array")[1] = json!("Age");

    let err = load_mutated_err(SCHEMA_FILE, v);
    assert!(
        matches!(err, ArtifactError::DuplicateFeature { ref name, first: 0, second: 1 } if name == "Age"),
        "got: {err:?}"
    );
}

#[test]
fn validation_fails_on_short_scale_vector() {
    let mut v = load_fixture_value(SCALER_FILE);
    v.get_mut("scale_")
        .and_then(|x| x.as_array_mut())
        .expect("scale array")
        .pop();

    let err = load_mutated_err(SCALER_FILE, v);
    assert!(
        matches!(
            err,
            ArtifactError::LengthMismatch {
                kind: ArtifactKind::Scaler,
                expected: 50,
                actual: 49
            }
        ),
        "got: {err:?}"
    );
}

#[test]
fn validation_fails_on_zero_scale() {
    let mut v = load_fixture_value(SCALER_FILE);
    *v.pointer_mut("/scale_/3").expect("scale entry") = json!(0.0);

    let err = load_mutated_err(SCALER_FILE, v);
    assert!(
        matches!(err, ArtifactError::DegenerateScale { ref feature, .. } if feature == "Education"),
        "got: {err:?}"
    );
}

#[test]
fn validation_fails_on_extra_weight() {
    let mut v = load_fixture_value(MODEL_FILE);
    v.get_mut("coef")
        .and_then(|x| x.as_array_mut())
        .expect("coef array")
        .push(json!(0.1));

    let err = load_mutated_err(MODEL_FILE, v);
    assert!(
        matches!(
            err,
            ArtifactError::LengthMismatch {
                kind: ArtifactKind::Model,
                expected: 50,
                actual: 51
            }
        ),
        "got: {err:?}"
    );
}

#[test]
fn parse_fails_on_unknown_model_field() {
    let mut v = load_fixture_value(MODEL_FILE);
    v.as_object_mut()
        .expect("model object")
        .insert("classes_".into(), json!([0, 1]));

    let err = load_mutated_err(MODEL_FILE, v);
    assert!(
        matches!(
            err,
            ArtifactError::Parse {
                kind: ArtifactKind::Model,
                ..
            }
        ),
        "got: {err:?}"
    );
}

#[test]
fn bundle_with_missing_section_is_parse_error() {
    let doc = json!({"feature_names": ["a"], "scaler": {"mean": [0.0], "scale": [1.0]}});
    let bytes = serde_json::to_vec(&doc).unwrap();
    let err = ArtifactSet::read_json(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        ArtifactError::Parse {
            kind: ArtifactKind::Bundle,
            ..
        }
    ));
}
