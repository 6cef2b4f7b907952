//! Feature alignment and scaling.
//!
//! Turns a [`RawRecord`](crate::dataset::RawRecord) into the vector the model
//! was trained on:
//!
//! ```text
//! RawRecord --encode--> EncodedVector --Scaler::scale--> ScaledVector
//! ```

mod encoder;
mod scaler;
mod vector;

pub use encoder::{encode, indicator_name};
pub use scaler::{Scaler, ScalingParameters};
pub use vector::{Encoded, EncodedVector, FeatureVector, Scaled, ScaledVector};
