use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a form in the schema store, e.g. `"patient-intake"` or `42`.
///
/// Stores may send identifiers as JSON strings or numbers; both are kept
/// as their textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FormId(String);

/// Identifier of a field, unique within its form.
///
/// Used as the key of `Visibility` and in validation reports.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FieldId(String);

/// The key under which a field's answer is stored.
///
/// Conditional rules reference other fields by this name, not by id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FormId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A readable label derived from the name, e.g. `blood_type` -> `Blood Type`.
    pub fn to_title(&self) -> String {
        self.0
            .split(['_', '-'])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Wire form of an opaque identifier.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for FormId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
    }
}

impl<'de> Deserialize<'de> for FieldId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FormId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&FormId> for FormId {
    fn from(id: &FormId) -> Self {
        id.clone()
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for FieldName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for FieldName {
    fn from(s: &String) -> Self {
        Self::new(s.clone())
    }
}

impl From<&FieldName> for FieldName {
    fn from(name: &FieldName) -> Self {
        name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_are_accepted() {
        let id: FormId = serde_json::from_str("17").unwrap();
        assert_eq!(id.as_str(), "17");

        let id: FieldId = serde_json::from_str("\"f-3\"").unwrap();
        assert_eq!(id.as_str(), "f-3");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&FormId::new("intake")).unwrap();
        assert_eq!(json, "\"intake\"");
    }

    #[test]
    fn title_from_name() {
        assert_eq!(FieldName::new("blood_type").to_title(), "Blood Type");
        assert_eq!(FieldName::new("emergency-contact").to_title(), "Emergency Contact");
        assert_eq!(FieldName::new("age").to_title(), "Age");
    }

    #[test]
    fn display() {
        let name = FieldName::new("allergies");
        assert_eq!(format!("{name}"), "allergies");
    }
}
