//! Feature schema: the ordered column names the model was trained on.

use std::collections::HashMap;

use crate::error::{ArtifactError, ArtifactKind};

/// Ordered, duplicate-free list of model input columns.
///
/// Column order is the training-time order of the expanded (one-hot) feature
/// matrix. Every vector in the pipeline is indexed by this order.
///
/// # Example
///
/// ```
/// use attrition::dataset::FeatureSchema;
///
/// let schema = FeatureSchema::new(["Age", "OverTime_Yes", "OverTime_No"]).unwrap();
/// assert_eq!(schema.len(), 3);
/// assert_eq!(schema.index_of("OverTime_Yes"), Some(1));
/// assert_eq!(schema.index_of("OverTime_Maybe"), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureSchema {
    /// Column names in model order.
    names: Vec<String>,

    /// Column name → position.
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Create a schema from column names.
    ///
    /// # Errors
    ///
    /// - [`ArtifactError::Empty`] if `names` is empty
    /// - [`ArtifactError::DuplicateFeature`] if a name occurs twice
    pub fn new<I, S>(names: I) -> Result<Self, ArtifactError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ArtifactError::Empty(ArtifactKind::Schema));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if let Some(first) = index.insert(name.clone(), position) {
                return Err(ArtifactError::DuplicateFeature {
                    name: name.clone(),
                    first,
                    second: position,
                });
            }
        }

        Ok(Self { names, index })
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false` for a constructed schema; provided for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a column, if the model knows it.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns `true` if the schema has a column with this name.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Column name at a position.
    #[inline]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// All column names in model order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over column names in model order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Positions of the indicator columns expanded from `attribute`.
    ///
    /// Indicator columns are named `{attribute}_{category}`. Matching is by
    /// name prefix only: the schema does not record which attribute a column
    /// came from, so if another attribute is named `{attribute}_{suffix}` its
    /// columns are returned too.
    pub fn indicator_positions(&self, attribute: &str) -> Vec<usize> {
        let prefix = format!("{attribute}_");
        self.names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.starts_with(&prefix))
            .map(|(i, _)| i)
            .collect()
    }
}
