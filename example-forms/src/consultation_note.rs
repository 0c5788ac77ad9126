use schema_form::{ApiEnvelope, FormDefinition, SchemaLoadError};

/// A schema store response, as the REST endpoint sends it.
///
/// Mixes camelCase and snake_case keys and uses numeric ids. The fields
/// arrive out of order; `notes` has no `displayOrder` and renders last.
pub const CONSULTATION_NOTE_JSON: &str = include_str!("../fixtures/consultation_note.json");

/// The consultation note, parsed from its fixture.
pub fn consultation_note() -> Result<FormDefinition, SchemaLoadError> {
    let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(CONSULTATION_NOTE_JSON)?;
    envelope.into_form_definition()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_parses_in_render_order() {
        let form = consultation_note().unwrap();
        let names: Vec<_> = form.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec![
                "chief_complaint",
                "outcome",
                "referral_specialty",
                "follow_up_date",
                "notes"
            ]
        );
        assert_eq!(form.submit_label(), "Save note");
        assert!(form.check().is_empty());
    }
}
