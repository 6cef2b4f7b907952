//! Validated artifact set and its on-disk layouts.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;

use super::convert::{model_from_schema, scaler_from_schema};
use super::schema::{ArtifactBundleSchema, FeatureNamesSchema, LinearModelSchema, ScalerSchema};
use crate::dataset::FeatureSchema;
use crate::error::{ArtifactError, ArtifactKind};
use crate::preprocess::Scaler;
use crate::repr::LinearModel;

/// File holding the feature schema inside an artifact directory.
pub const SCHEMA_FILE: &str = "columns.json";
/// File holding the scaling parameters inside an artifact directory.
pub const SCALER_FILE: &str = "scaler.json";
/// File holding the model weights inside an artifact directory.
pub const MODEL_FILE: &str = "model.json";

/// The three trained artifacts, validated against each other.
///
/// Every artifact has exactly one entry per schema feature, scales are
/// non-zero and all values are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    schema: FeatureSchema,
    scaler: Scaler,
    model: LinearModel,
}

impl ArtifactSet {
    pub(crate) fn from_parts(schema: FeatureSchema, scaler: Scaler, model: LinearModel) -> Self {
        Self {
            schema,
            scaler,
            model,
        }
    }

    /// The feature schema.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The validated scaler.
    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// The model weights.
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// Split into `(schema, scaler, model)`.
    pub fn into_parts(self) -> (FeatureSchema, Scaler, LinearModel) {
        (self.schema, self.scaler, self.model)
    }

    /// Read a bundle document (`{"feature_names", "scaler", "model"}`).
    pub fn read_json<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let bundle: ArtifactBundleSchema = parse(ArtifactKind::Bundle, reader)?;
        Self::try_from(bundle)
    }

    /// Write a bundle document.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), ArtifactError> {
        serde_json::to_writer_pretty(writer, &ArtifactBundleSchema::from(self)).map_err(|source| {
            ArtifactError::Write {
                kind: ArtifactKind::Bundle,
                source,
            }
        })
    }

    /// Load a bundle document from a file.
    pub fn load_bundle(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let set = Self::read_json(open(ArtifactKind::Bundle, path)?)?;
        info!(
            "loaded artifact bundle {} ({} features)",
            path.display(),
            set.schema.len()
        );
        Ok(set)
    }

    /// Load [`SCHEMA_FILE`], [`SCALER_FILE`] and [`MODEL_FILE`] from a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let schema = load_schema(dir.join(SCHEMA_FILE))?;

        let scaler: ScalerSchema = parse(
            ArtifactKind::Scaler,
            open(ArtifactKind::Scaler, &dir.join(SCALER_FILE))?,
        )?;
        let scaler = scaler_from_schema(scaler, &schema)?;

        let model: LinearModelSchema = parse(
            ArtifactKind::Model,
            open(ArtifactKind::Model, &dir.join(MODEL_FILE))?,
        )?;
        let model = model_from_schema(model, &schema)?;

        info!(
            "loaded artifacts from {} ({} features)",
            dir.display(),
            schema.len()
        );
        Ok(Self::from_parts(schema, scaler, model))
    }

    /// Write the three artifact files into an existing directory.
    pub fn save_dir(&self, dir: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let dir = dir.as_ref();
        write_file(
            ArtifactKind::Schema,
            &dir.join(SCHEMA_FILE),
            &FeatureNamesSchema::from(&self.schema),
        )?;
        write_file(
            ArtifactKind::Scaler,
            &dir.join(SCALER_FILE),
            &ScalerSchema::from(&self.scaler),
        )?;
        write_file(
            ArtifactKind::Model,
            &dir.join(MODEL_FILE),
            &LinearModelSchema::from(&self.model),
        )
    }
}

/// Read a feature schema from any reader.
pub fn read_schema<R: Read>(reader: R) -> Result<FeatureSchema, ArtifactError> {
    let names: FeatureNamesSchema = parse(ArtifactKind::Schema, reader)?;
    FeatureSchema::try_from(names)
}

/// Load a feature schema file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<FeatureSchema, ArtifactError> {
    read_schema(open(ArtifactKind::Schema, path.as_ref())?)
}

fn open(kind: ArtifactKind, path: &Path) -> Result<BufReader<File>, ArtifactError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ArtifactError::Io {
            kind,
            path: path.to_path_buf(),
            source,
        })
}

fn parse<T: DeserializeOwned, R: Read>(kind: ArtifactKind, reader: R) -> Result<T, ArtifactError> {
    serde_json::from_reader(reader).map_err(|source| ArtifactError::Parse { kind, source })
}

fn write_file<T: serde::Serialize>(
    kind: ArtifactKind,
    path: &Path,
    value: &T,
) -> Result<(), ArtifactError> {
    let file = File::create(path).map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|source| ArtifactError::Write { kind, source })?;
    writer.flush().map_err(|source| ArtifactError::Io {
        kind,
        path: path.to_path_buf(),
        source,
    })
}
