use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Answers, FormDefinition, FormId, SchemaLoadError};

/// The body posted to a submission sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub form_id: FormId,

    /// Every answer held when the payload was built, hidden fields included.
    pub answers: Answers,

    /// Serialized as an RFC 3339 timestamp in UTC.
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionPayload {
    pub fn new(form_id: impl Into<FormId>, answers: Answers, submitted_at: DateTime<Utc>) -> Self {
        Self {
            form_id: form_id.into(),
            answers,
            submitted_at,
        }
    }
}

/// The `{success, data, message}` wrapper every store endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,

    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// The message, or `fallback` when the store sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl ApiEnvelope<serde_json::Value> {
    /// Interpret a schema store response body.
    pub fn into_form_definition(self) -> Result<FormDefinition, SchemaLoadError> {
        if !self.success {
            return Err(SchemaLoadError::Rejected {
                message: self.message_or("schema store reported failure"),
            });
        }
        match self.data {
            Some(data) => FormDefinition::from_json_value(data),
            None => Err(SchemaLoadError::MissingFields),
        }
    }
}
