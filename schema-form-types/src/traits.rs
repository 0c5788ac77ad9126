use crate::{FormDefinition, FormId, SchemaLoadError, SubmissionError, SubmissionPayload};

/// Supplies form definitions by identifier.
///
/// Implementations decide where definitions come from (a REST endpoint,
/// memory, files) and map every failure onto `SchemaLoadError`.
pub trait SchemaStore {
    /// Fetch the definition of `form_id`. A single attempt; no retry.
    fn fetch_form(&self, form_id: &FormId) -> Result<FormDefinition, SchemaLoadError>;
}

/// Accepts finished submissions.
pub trait SubmissionSink {
    /// Deliver `payload`. A single attempt; no retry.
    ///
    /// # Returns
    /// * `Ok(())` when the sink accepted the payload
    /// * `Err(SubmissionError::Rejected)` with the sink's message otherwise
    fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError>;
}

impl<T: SchemaStore + ?Sized> SchemaStore for &T {
    fn fetch_form(&self, form_id: &FormId) -> Result<FormDefinition, SchemaLoadError> {
        (**self).fetch_form(form_id)
    }
}

impl<T: SubmissionSink + ?Sized> SubmissionSink for &T {
    fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        (**self).submit(payload)
    }
}
