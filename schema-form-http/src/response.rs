//! Interpretation of store responses, independent of the transport.

use schema_form::{ApiEnvelope, FormDefinition, SchemaLoadError, SubmissionError};
use serde_json::Value;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// The `message` of an envelope body, if the body is one.
fn envelope_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiEnvelope<Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
}

/// Turn a `GET /forms/{id}` response into a form definition.
pub fn read_schema_response(status: u16, body: &str) -> Result<FormDefinition, SchemaLoadError> {
    if !is_success(status) {
        let message =
            envelope_message(body).unwrap_or_else(|| format!("request failed with status {status}"));
        return Err(SchemaLoadError::Status { status, message });
    }

    let envelope: ApiEnvelope<Value> = serde_json::from_str(body)?;
    envelope.into_form_definition()
}

/// Turn a `POST /form-submissions` response into an outcome.
///
/// A 2xx response with an empty body counts as accepted. The sink's
/// `message` is passed through verbatim on rejection.
pub fn read_submission_response(status: u16, body: &str) -> Result<(), SubmissionError> {
    if !is_success(status) {
        let message = envelope_message(body)
            .unwrap_or_else(|| format!("Submission failed with status {status}"));
        return Err(SubmissionError::Rejected {
            status: Some(status),
            message,
        });
    }

    if body.trim().is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<ApiEnvelope<Value>>(body) {
        Ok(envelope) if envelope.success => Ok(()),
        Ok(envelope) => Err(SubmissionError::Rejected {
            status: Some(status),
            message: envelope.message_or("Submission failed"),
        }),
        Err(err) => Err(SubmissionError::unreachable(
            anyhow::Error::new(err).context("unreadable submission response"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_form::FieldType;

    #[test]
    fn schema_success() {
        let body = r#"{
            "success": true,
            "data": {
                "id": 7,
                "title": "Intake",
                "fields": [
                    { "id": 1, "name": "name", "label": "Name", "type": "text", "required": true }
                ]
            }
        }"#;
        let form = read_schema_response(200, body).unwrap();
        assert_eq!(form.id.as_str(), "7");
        assert_eq!(form.fields()[0].field_type(), FieldType::Text);
    }

    #[test]
    fn schema_not_found_carries_message() {
        let body = r#"{ "success": false, "message": "Form 9 does not exist" }"#;
        match read_schema_response(404, body).unwrap_err() {
            SchemaLoadError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Form 9 does not exist");
            }
            other => panic!("Expected status error, got {other:?}"),
        }
    }

    #[test]
    fn schema_server_error_without_envelope() {
        let err = read_schema_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn schema_success_false() {
        let body = r#"{ "success": false, "message": "archived" }"#;
        assert!(matches!(
            read_schema_response(200, body),
            Err(SchemaLoadError::Rejected { message }) if message == "archived"
        ));
    }

    #[test]
    fn schema_without_fields() {
        let body = r#"{ "success": true, "data": { "id": "f", "title": "F" } }"#;
        assert!(matches!(
            read_schema_response(200, body),
            Err(SchemaLoadError::MissingFields)
        ));
    }

    #[test]
    fn schema_not_json() {
        assert!(matches!(
            read_schema_response(200, "not json"),
            Err(SchemaLoadError::Malformed(_))
        ));
    }

    #[test]
    fn submission_accepted() {
        assert!(read_submission_response(201, r#"{ "success": true }"#).is_ok());
        assert!(read_submission_response(204, "").is_ok());
    }

    #[test]
    fn submission_rejected_verbatim() {
        let body = r#"{ "success": false, "message": "Email already registered" }"#;
        let err = read_submission_response(422, body).unwrap_err();
        assert_eq!(err.message(), "Email already registered");
        assert!(matches!(
            err,
            SubmissionError::Rejected {
                status: Some(422),
                ..
            }
        ));

        let err = read_submission_response(200, body).unwrap_err();
        assert_eq!(err.message(), "Email already registered");
    }

    #[test]
    fn submission_failure_fallback_message() {
        let err = read_submission_response(500, "").unwrap_err();
        assert_eq!(err.message(), "Submission failed with status 500");

        let err = read_submission_response(200, r#"{ "success": false }"#).unwrap_err();
        assert_eq!(err.message(), "Submission failed");
    }
}
