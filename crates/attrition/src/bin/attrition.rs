//! Command-line front end for attrition predictions.
//!
//! Usage:
//!   attrition --artifacts DIR predict record.json
//!   attrition --artifacts bundle.json batch records.json --threads 4
//!   attrition --artifacts DIR schema
//!   attrition defaults
//!
//! Records are JSON objects mapping attribute names to numbers or category
//! labels. Without an input path (or with `-`) the record is read from stdin.
//! Log verbosity follows `RUST_LOG` (default `warn`).

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::{info, warn};
use serde_json::{json, Value};

use attrition::dataset::{AttributeCatalog, FeatureSchema, RawRecord};
use attrition::model::{Assessment, AttritionModel, PipelineConfig};
use attrition::persist::{load_schema, ArtifactSet, SCHEMA_FILE};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(
    name = "attrition",
    version,
    about = "Predict employee attrition and explain the prediction feature by feature."
)]
struct Cli {
    /// Artifact directory (columns.json, scaler.json, model.json) or bundle file
    #[arg(long, short, global = true, default_value = "artifacts")]
    artifacts: PathBuf,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of attributions to show (overrides the configuration file)
    #[arg(long, global = true, value_name = "K")]
    top_k: Option<usize>,

    /// Threads for batch assessment: 0 = auto, 1 = sequential
    #[arg(long, global = true, value_name = "N")]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess a single employee record
    Predict {
        /// JSON record; stdin if omitted or `-`
        #[arg(value_name = "RECORD")]
        input: Option<PathBuf>,
    },

    /// Assess a JSON array of employee records
    Batch {
        /// JSON array of records; stdin if omitted or `-`
        #[arg(value_name = "RECORDS")]
        input: Option<PathBuf>,
    },

    /// Print the model's feature names in order
    Schema,

    /// Print a record holding every attribute's default value
    Defaults,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Predict { input } => predict(&cli, input.as_deref()),
        Commands::Batch { input } => batch(&cli, input.as_deref()),
        Commands::Schema => schema(&cli.artifacts),
        Commands::Defaults => defaults(),
    };

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

// =============================================================================
// Commands
// =============================================================================

fn predict(cli: &Cli, input: Option<&Path>) -> CliResult<()> {
    let model = load_model(cli)?;
    let record: RawRecord = serde_json::from_reader(open_input(input)?)?;
    warn_catalog_issues(&record, None);

    let assessment = model.assess(&record)?;
    emit(&response(&assessment))
}

fn batch(cli: &Cli, input: Option<&Path>) -> CliResult<()> {
    let model = load_model(cli)?;
    let records: Vec<RawRecord> = serde_json::from_reader(open_input(input)?)?;
    for (i, record) in records.iter().enumerate() {
        warn_catalog_issues(record, Some(i));
    }

    let assessments = model.assess_batch(&records)?;
    info!("assessed {} records", assessments.len());
    emit(&Value::Array(assessments.iter().map(response).collect()))
}

fn schema(artifacts: &Path) -> CliResult<()> {
    let schema: FeatureSchema = if artifacts.is_dir() {
        load_schema(artifacts.join(SCHEMA_FILE))?
    } else {
        ArtifactSet::load_bundle(artifacts)?.into_parts().0
    };
    emit(&json!(schema.names()))
}

fn defaults() -> CliResult<()> {
    emit(&serde_json::to_value(AttributeCatalog::employee().default_record())?)
}

// =============================================================================
// Helpers
// =============================================================================

fn load_model(cli: &Cli) -> CliResult<AttritionModel> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(top_k) = cli.top_k {
        config.top_k = top_k;
    }
    if let Some(threads) = cli.threads {
        config.n_threads = threads;
    }
    config.validate()?;

    let model = if cli.artifacts.is_dir() {
        AttritionModel::load_dir(&cli.artifacts, config)?
    } else {
        AttritionModel::load_bundle(&cli.artifacts, config)?
    };
    Ok(model)
}

fn open_input(input: Option<&Path>) -> CliResult<Box<dyn Read>> {
    match input {
        None => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) if path == Path::new("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

fn warn_catalog_issues(record: &RawRecord, position: Option<usize>) {
    for issue in AttributeCatalog::employee().check(record) {
        match position {
            Some(i) => warn!("record {i}: {issue}"),
            None => warn!("{issue}"),
        }
    }
}

fn response(assessment: &Assessment) -> Value {
    let prediction = &assessment.prediction;
    json!({
        "label": prediction.label,
        "probability": prediction.probability,
        "margin": prediction.margin,
        "expected_value": assessment.attribution.expected_value(),
        "top_features": assessment.top_features(),
        "attributions": assessment.attribution.ranked(),
    })
}

fn emit(value: &Value) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
