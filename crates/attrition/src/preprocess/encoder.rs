//! One-hot expansion and schema alignment of raw records.
//!
//! Numeric attributes are copied to the column of the same name. A
//! categorical attribute `A` with label `v` sets the indicator column `A_v`
//! to 1. Every other schema column stays 0, which covers three cases with the
//! same rule:
//!
//! - attribute missing from the record
//! - categorical label never seen at training time
//! - indicator columns of the labels that were not chosen
//!
//! Record entries with no matching column are dropped, and so are non-finite
//! numeric values. The output therefore always has the schema's length and
//! order and only finite entries.

use log::trace;

use super::vector::EncodedVector;
use crate::dataset::{AttributeValue, FeatureSchema, RawRecord};

/// Name of the indicator column for `attribute == category`.
///
/// ```
/// use attrition::preprocess::indicator_name;
///
/// assert_eq!(indicator_name("BusinessTravel", "Travel_Rarely"), "BusinessTravel_Travel_Rarely");
/// ```
#[inline]
pub fn indicator_name(attribute: &str, category: &str) -> String {
    format!("{attribute}_{category}")
}

/// Expand `record` into a vector aligned to `schema`.
///
/// Total: defined for every record, never fails.
///
/// # Example
///
/// ```
/// use attrition::dataset::{FeatureSchema, RawRecord};
/// use attrition::preprocess::encode;
///
/// let schema = FeatureSchema::new(["Age", "OverTime_No", "OverTime_Yes"]).unwrap();
/// let record = RawRecord::new().with("Age", 41).with("OverTime", "Yes");
///
/// assert_eq!(encode(&record, &schema).to_vec(), vec![41.0, 0.0, 1.0]);
/// ```
pub fn encode(record: &RawRecord, schema: &FeatureSchema) -> EncodedVector {
    let mut encoded = EncodedVector::zeros(schema.len());
    let values = encoded.values_mut();

    for (attribute, value) in record.iter() {
        match value {
            AttributeValue::Numeric(x) if !x.is_finite() => {
                trace!("dropping numeric attribute {attribute:?}: non-finite value {x}")
            }
            AttributeValue::Numeric(x) => match schema.index_of(attribute) {
                Some(i) => values[i] = *x,
                None => trace!("dropping numeric attribute {attribute:?}: not a model input"),
            },
            AttributeValue::Categorical(category) => {
                let column = indicator_name(attribute, category);
                match schema.index_of(&column) {
                    Some(i) => values[i] = 1.0,
                    None => trace!("no column {column:?}: {attribute} treated as absent"),
                }
            }
        }
    }

    encoded
}
