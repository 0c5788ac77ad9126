use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{AnswerValue, FieldName, FieldType};

/// Error type for typed answer access.
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("Missing answer for field: {0}")]
    Missing(FieldName),

    #[error("Type mismatch for field '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        name: FieldName,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("'{input}' is not a valid {field_type} answer")]
    InvalidInput { input: String, field_type: FieldType },
}

/// The live answer state of a form, keyed by field name.
///
/// Serializes as a plain JSON object, which is also the `answers` member
/// of a submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: HashMap<FieldName, AnswerValue>,
}

impl Answers {
    /// Create a new empty answer map.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Insert an answer, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<FieldName>,
        value: impl Into<AnswerValue>,
    ) -> Option<AnswerValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Get the answer stored under `name`.
    pub fn get(&self, name: &FieldName) -> Option<&AnswerValue> {
        self.values.get(name)
    }

    /// Check if an answer exists for `name`.
    pub fn contains(&self, name: &FieldName) -> bool {
        self.values.contains_key(name)
    }

    /// Remove the answer stored under `name`.
    pub fn remove(&mut self, name: &FieldName) -> Option<AnswerValue> {
        self.values.remove(name)
    }

    /// Get an iterator over all name-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &AnswerValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a text answer.
    pub fn get_text(&self, name: &FieldName) -> Result<&str, AnswerError> {
        match self.get(name) {
            Some(AnswerValue::Text(s)) => Ok(s),
            Some(other) => Err(AnswerError::TypeMismatch {
                name: name.clone(),
                expected: "Text",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(name.clone())),
        }
    }

    /// Get the selections of a checkbox group.
    pub fn get_set(&self, name: &FieldName) -> Result<&BTreeSet<String>, AnswerError> {
        match self.get(name) {
            Some(AnswerValue::Set(values)) => Ok(values),
            Some(other) => Err(AnswerError::TypeMismatch {
                name: name.clone(),
                expected: "Set",
                actual: other.type_name(),
            }),
            None => Err(AnswerError::Missing(name.clone())),
        }
    }

    /// Check whether the answer under `name` is present and non-empty.
    pub fn has_value(&self, name: &FieldName) -> bool {
        self.get(name).is_some_and(|value| !value.is_empty())
    }
}

impl FromIterator<(FieldName, AnswerValue)> for Answers {
    fn from_iter<T: IntoIterator<Item = (FieldName, AnswerValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Answers {
    type Item = (FieldName, AnswerValue);
    type IntoIter = std::collections::hash_map::IntoIter<FieldName, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Answers {
    type Item = (&'a FieldName, &'a AnswerValue);
    type IntoIter = std::collections::hash_map::Iter<'a, FieldName, AnswerValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
