use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// A single answer value held in `Answers`.
///
/// Text-like fields, selects, radios and dates store `Text`. Checkboxes
/// store the text `"true"` or `"false"`. Checkbox groups store a `Set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A scalar string answer.
    Text(String),

    /// The selected option values of a checkbox group.
    Set(BTreeSet<String>),
}

/// The legal shape of an answer, determined by the field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerShape {
    Text,
    Set,
}

impl AnswerShape {
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Set => "Set",
        }
    }

    /// The empty answer of this shape.
    pub fn empty_value(self) -> AnswerValue {
        match self {
            Self::Text => AnswerValue::Text(String::new()),
            Self::Set => AnswerValue::Set(BTreeSet::new()),
        }
    }
}

impl AnswerValue {
    /// Build a set answer from any iterator of values.
    pub fn set<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Set(values.into_iter().map(Into::into).collect())
    }

    /// Build a checkbox answer.
    pub fn flag(checked: bool) -> Self {
        Self::Text(checked.to_string())
    }

    /// `true` for the empty string and the empty set.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Set(values) => values.is_empty(),
        }
    }

    pub fn shape(&self) -> AnswerShape {
        match self {
            Self::Text(_) => AnswerShape::Text,
            Self::Set(_) => AnswerShape::Set,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Set(_) => None,
        }
    }

    /// Try to get this value as a set of selections.
    pub fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Set(values) => Some(values),
            Self::Text(_) => None,
        }
    }

    /// Interpret a checkbox answer. Only the exact text `"true"` is checked.
    pub fn is_checked(&self) -> bool {
        self.as_str() == Some("true")
    }

    /// Whether this value is the given option (text) or contains it (set).
    pub fn contains_option(&self, option: &str) -> bool {
        match self {
            Self::Text(s) => s == option,
            Self::Set(values) => values.contains(option),
        }
    }

    /// Exact equality against a rule's trigger value.
    ///
    /// A set never equals a string.
    pub fn equals_text(&self, expected: &str) -> bool {
        self.as_str() == Some(expected)
    }

    /// Get the type name of this value for error messages.
    pub fn type_name(&self) -> &'static str {
        self.shape().name()
    }
}

/// Wire form of an answer, as found in `defaultValue` or a submitted map.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Text(String),
    Bool(bool),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawAnswer::deserialize(deserializer)? {
            RawAnswer::Text(s) => Self::Text(s),
            RawAnswer::Bool(b) => Self::flag(b),
            RawAnswer::Number(n) => Self::Text(n.to_string()),
            RawAnswer::List(values) => Self::set(values),
        })
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        Self::flag(b)
    }
}

impl From<BTreeSet<String>> for AnswerValue {
    fn from(values: BTreeSet<String>) -> Self {
        Self::Set(values)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        Self::set(values)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        Self::set(values)
    }
}
