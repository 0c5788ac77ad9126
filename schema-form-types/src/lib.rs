//! Core types for the schema-form crate.
//!
//! This crate provides the foundational, presentation-agnostic types:
//! - `FormDefinition` and `FieldDefinition` - The declarative form schema
//! - `FieldType` - The closed set of input kinds
//! - `Answers` and `AnswerValue` - Live answer state, keyed by field name
//! - `Visibility` - Per-field visibility derived from the answers
//! - `SubmissionPayload` and `ApiEnvelope` - What goes over the wire
//! - `SchemaStore` and `SubmissionSink` traits - The REST collaborators

mod ids;
pub use ids::{FieldId, FieldName, FormId};

mod answer_value;
pub use answer_value::{AnswerShape, AnswerValue};

mod answers;
pub use answers::{AnswerError, Answers};

mod field;
pub use field::{ConditionalRule, FieldDefinition, FieldOption, FieldType};

mod form_definition;
pub use form_definition::FormDefinition;

mod visibility;
pub use visibility::Visibility;

mod submission;
pub use submission::{ApiEnvelope, SubmissionPayload};

mod error;
pub use error::{SchemaIssue, SchemaLoadError, SubmissionError};

mod traits;
pub use traits::{SchemaStore, SubmissionSink};
