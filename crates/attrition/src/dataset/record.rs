//! Raw attribute records as produced by the input collector.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Value of a single raw attribute.
///
/// Deserializes from a bare JSON number or string:
///
/// ```
/// use attrition::dataset::AttributeValue;
///
/// let v: AttributeValue = serde_json::from_str("42").unwrap();
/// assert_eq!(v, AttributeValue::Numeric(42.0));
/// let v: AttributeValue = serde_json::from_str("\"Sales\"").unwrap();
/// assert_eq!(v, AttributeValue::Categorical("Sales".into()));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Passed through to the column of the same name.
    Numeric(f64),
    /// Expanded into the indicator column `{attribute}_{label}`.
    Categorical(String),
}

impl AttributeValue {
    /// The numeric value, if this is a numeric attribute.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(x) => Some(*x),
            Self::Categorical(_) => None,
        }
    }

    /// The label, if this is a categorical attribute.
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Categorical(label) => Some(label),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(x: f64) -> Self {
        Self::Numeric(x)
    }
}

impl From<i32> for AttributeValue {
    fn from(x: i32) -> Self {
        Self::Numeric(f64::from(x))
    }
}

impl From<&str> for AttributeValue {
    fn from(label: &str) -> Self {
        Self::Categorical(label.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(label: String) -> Self {
        Self::Categorical(label)
    }
}

/// One employee's raw attributes, keyed by attribute name.
///
/// Serializes as a flat JSON object. Iteration is in name order, so encoding
/// a record is deterministic.
///
/// # Example
///
/// ```
/// use attrition::dataset::RawRecord;
///
/// let record = RawRecord::new()
///     .with("Age", 34)
///     .with("OverTime", "Yes");
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.get("Age").and_then(|v| v.as_numeric()), Some(34.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    attributes: BTreeMap<String, AttributeValue>,
}

impl RawRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an attribute, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.attributes.insert(name.into(), value.into())
    }

    /// Look up an attribute.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let attributes = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { attributes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flat_json_object() {
        let json = r#"{"Age": 41, "Department": "Sales", "MonthlyIncome": 5993.5}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("Age"), Some(&AttributeValue::Numeric(41.0)));
        assert_eq!(
            record.get("Department").and_then(AttributeValue::as_category),
            Some("Sales")
        );
        assert_eq!(
            record.get("MonthlyIncome").and_then(AttributeValue::as_numeric),
            Some(5993.5)
        );
    }

    #[test]
    fn serializes_back_to_flat_object() {
        let record = RawRecord::new().with("Gender", "Female").with("Age", 30);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"Age":30.0,"Gender":"Female"}"#);
    }

    #[test]
    fn iterates_in_name_order() {
        let record: RawRecord = [("b", 1.0), ("a", 2.0), ("c", 3.0)].into_iter().collect();
        let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn insert_replaces() {
        let mut record = RawRecord::new().with("OverTime", "No");
        let previous = record.insert("OverTime", "Yes");
        assert_eq!(previous, Some(AttributeValue::Categorical("No".into())));
        assert_eq!(record.len(), 1);
    }
}
