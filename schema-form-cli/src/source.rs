//! Reading definitions and answers from local files and arguments.

use std::path::Path;

use anyhow::Context;
use schema_form::{ApiEnvelope, Answers, FormDefinition, FormEngine};
use serde_json::Value;

/// Parse a `name=value` argument. The value may be empty or contain `=`.
pub fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got {arg:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in {arg:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Parse a definition from JSON text.
///
/// Accepts either a store envelope (`{success, data, message}`) or a bare
/// definition.
pub fn read_definition(text: &str) -> anyhow::Result<FormDefinition> {
    let value: Value = serde_json::from_str(text).context("definition is not JSON")?;
    let definition = if value.get("success").is_some() {
        let envelope: ApiEnvelope<Value> = serde_json::from_value(value)?;
        envelope.into_form_definition()?
    } else {
        FormDefinition::from_json_value(value)?
    };
    Ok(definition)
}

pub(crate) fn read_definition_file(path: &Path) -> anyhow::Result<FormDefinition> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    read_definition(&text).with_context(|| format!("could not load form from {}", path.display()))
}

/// Parse a JSON object of answers.
pub fn read_answers(text: &str) -> anyhow::Result<Answers> {
    serde_json::from_str(text).context("answers must be a JSON object of field names to values")
}

pub(crate) fn read_answers_file(path: &Path) -> anyhow::Result<Answers> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    read_answers(&text)
}

/// Apply file answers, then `name=value` assignments, to a loaded engine.
///
/// File answers are applied in field render order so that the outcome does
/// not depend on map iteration order.
pub fn apply_answers(
    engine: &mut FormEngine,
    file_answers: Option<Answers>,
    assignments: &[(String, String)],
) -> anyhow::Result<()> {
    if let Some(mut answers) = file_answers {
        let names: Vec<_> = engine
            .definition()
            .map(|d| d.fields().iter().map(|f| f.name().clone()).collect())
            .unwrap_or_default();
        for name in names {
            if let Some(value) = answers.remove(&name) {
                engine
                    .set_answer(name.clone(), value)
                    .with_context(|| format!("answer for {name}"))?;
            }
        }
        if let Some((name, _)) = answers.iter().next() {
            anyhow::bail!("answers file names unknown field {name}");
        }
    }

    for (name, value) in assignments {
        engine
            .set_input(name.as_str(), value)
            .with_context(|| format!("--set {name}={value}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_parsing() {
        assert_eq!(
            parse_assignment("name=Ana").unwrap(),
            ("name".to_string(), "Ana".to_string())
        );
        assert_eq!(
            parse_assignment("eq=a=b").unwrap(),
            ("eq".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn bare_and_enveloped_definitions() {
        let bare = r#"{ "id": "f", "title": "F", "fields": [] }"#;
        assert_eq!(read_definition(bare).unwrap().id.as_str(), "f");

        let wrapped = r#"{ "success": true, "data": { "id": "f", "title": "F", "fields": [] } }"#;
        assert_eq!(read_definition(wrapped).unwrap().id.as_str(), "f");

        let failed = r#"{ "success": false, "message": "gone" }"#;
        assert!(read_definition(failed).unwrap_err().to_string().contains("gone"));
    }
}
