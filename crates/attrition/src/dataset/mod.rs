//! Inputs of the pipeline: the feature schema and raw attribute records.
//!
//! # Key Types
//!
//! - [`FeatureSchema`]: ordered model columns, fixed at training time
//! - [`RawRecord`]: one employee's attributes as collected
//! - [`AttributeCatalog`]: domains and defaults of the collected attributes
//!
//! # Example
//!
//! ```
//! use attrition::dataset::{AttributeCatalog, FeatureSchema, RawRecord};
//!
//! let schema = FeatureSchema::new(["Age", "OverTime_Yes", "OverTime_No"]).unwrap();
//! let record = RawRecord::new().with("Age", 29).with("OverTime", "Yes");
//!
//! assert!(schema.contains("OverTime_Yes"));
//! assert_eq!(AttributeCatalog::employee().len(), 29);
//! # let _ = record;
//! ```

mod catalog;
mod record;
mod schema;

pub use catalog::{AttributeCatalog, AttributeDomain, AttributeSpec, CatalogIssue, EMPLOYEE_ATTRIBUTES};
pub use record::{AttributeValue, RawRecord};
pub use schema::FeatureSchema;
