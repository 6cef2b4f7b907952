//! High-level pipeline and its configuration.

mod attrition;
mod config;

pub use attrition::{Assessment, AttritionModel};
pub use config::{PipelineConfig, PipelineConfigBuilder, PipelineConfigError, DEFAULT_TOP_K};
