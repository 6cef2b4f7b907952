//! Canonical model representations.
//!
//! The [`LinearModel`] holds the trained coefficients of the attrition
//! classifier. It carries no feature names: weights are aligned to the
//! [`FeatureSchema`](crate::dataset::FeatureSchema) by position.

mod linear;

pub use linear::LinearModel;
