use crate::{FieldId, FieldName, FieldType, FormId};

/// Failure to obtain a usable form definition from a schema store.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    /// The store could not be reached (connection, DNS, timeout, I/O).
    #[error("Schema store unreachable: {0}")]
    Unreachable(#[from] anyhow::Error),

    /// The store answered with a non-success HTTP status.
    #[error("Schema store returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The store answered `success: false`.
    #[error("Schema store rejected the request: {message}")]
    Rejected { message: String },

    /// No form with this id.
    #[error("Form not found: {0}")]
    NotFound(FormId),

    /// The response carries no `fields` sequence.
    #[error("Schema response has no `fields` sequence")]
    MissingFields,

    /// The response is not a well-formed form definition.
    #[error("Malformed schema: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The definition parsed, but is structurally unusable.
    #[error("Invalid schema: {}", join_issues(.0))]
    InvalidSchema(Vec<SchemaIssue>),
}

impl SchemaLoadError {
    /// Create an unreachable-store error from any error type.
    pub fn unreachable(err: impl Into<anyhow::Error>) -> Self {
        Self::Unreachable(err.into())
    }
}

/// Failure to deliver a submission payload.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// The sink could not be reached.
    #[error("Submission sink unreachable: {0}")]
    Unreachable(#[from] anyhow::Error),

    /// The sink rejected the payload. `message` is the sink's own text.
    #[error("Submission rejected: {message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },
}

impl SubmissionError {
    /// Create an unreachable-sink error from any error type.
    pub fn unreachable(err: impl Into<anyhow::Error>) -> Self {
        Self::Unreachable(err.into())
    }

    /// A rejection without an HTTP status (e.g. `success: false`).
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: None,
            message: message.into(),
        }
    }

    /// The message to show the user.
    pub fn message(&self) -> String {
        match self {
            Self::Unreachable(err) => err.to_string(),
            Self::Rejected { message, .. } => message.clone(),
        }
    }
}

/// A structural problem found by `FormDefinition::check`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaIssue {
    #[error("duplicate field id '{0}'")]
    DuplicateId(FieldId),

    #[error("duplicate field name '{0}'")]
    DuplicateName(FieldName),

    #[error("{field_type} field '{field}' has no options")]
    MissingOptions { field: FieldId, field_type: FieldType },

    #[error("field '{field}' depends on unknown field '{depends_on}'")]
    UnknownDependency { field: FieldId, depends_on: FieldName },

    #[error("default of {field_type} field '{field}' is not a valid answer and is ignored")]
    UnusableDefault { field: FieldId, field_type: FieldType },
}

impl SchemaIssue {
    /// Fatal issues make a form fail to load.
    ///
    /// A rule on an unknown dependency only means the trigger value never
    /// matches, and an unusable default falls back to the empty answer, so
    /// both are tolerated.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::UnknownDependency { .. } | Self::UnusableDefault { .. }
        )
    }
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
