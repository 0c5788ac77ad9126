//! In-memory schema store and submission sink.
//!
//! `MemoryStore` serves pre-registered form definitions and records the
//! payloads it receives, so engines can be exercised without a REST server.
//!
//! # Example
//!
//! ```rust
//! use schema_form::{FieldDefinition, FieldType, FormDefinition, FormEngine, MemoryStore};
//!
//! let store = MemoryStore::new().with_form(FormDefinition::new(
//!     "f1",
//!     "Registration",
//!     vec![FieldDefinition::new("1", "name", "Name", FieldType::Text).required()],
//! ));
//!
//! let mut engine = FormEngine::new();
//! engine.load(&store, "f1").unwrap();
//! engine.set_answer("name", "Ana").unwrap();
//!
//! let payload = engine.build_submission("f1");
//! engine.submit(&store, &payload).unwrap();
//! assert_eq!(store.submissions().len(), 1);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use crate::{
    FormDefinition, FormId, SchemaLoadError, SchemaStore, SubmissionError, SubmissionPayload,
    SubmissionSink,
};

/// A store that answers from memory.
///
/// Failures can be scripted: `fail_next_load` / `reject_next_submission`
/// queue an outcome that is consumed by the next matching call.
#[derive(Debug, Default)]
pub struct MemoryStore {
    forms: HashMap<FormId, FormDefinition>,
    load_failures: RefCell<VecDeque<String>>,
    rejections: RefCell<VecDeque<String>>,
    submissions: RefCell<Vec<SubmissionPayload>>,
    fetches: RefCell<Vec<FormId>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a form under its own id.
    pub fn with_form(mut self, definition: FormDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Register a form, replacing any earlier one with the same id.
    pub fn insert(&mut self, definition: FormDefinition) {
        self.forms.insert(definition.id.clone(), definition);
    }

    /// Make the next fetch fail as a rejection carrying `message`.
    pub fn fail_next_load(&self, message: impl Into<String>) {
        self.load_failures.borrow_mut().push_back(message.into());
    }

    /// Make the next submission be rejected with `message`.
    pub fn reject_next_submission(&self, message: impl Into<String>) {
        self.rejections.borrow_mut().push_back(message.into());
    }

    /// Payloads accepted so far, in arrival order.
    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.borrow().clone()
    }

    /// Ids requested so far, in request order.
    pub fn fetches(&self) -> Vec<FormId> {
        self.fetches.borrow().clone()
    }
}

impl SchemaStore for MemoryStore {
    fn fetch_form(&self, form_id: &FormId) -> Result<FormDefinition, SchemaLoadError> {
        self.fetches.borrow_mut().push(form_id.clone());

        if let Some(message) = self.load_failures.borrow_mut().pop_front() {
            return Err(SchemaLoadError::Rejected { message });
        }

        self.forms
            .get(form_id)
            .cloned()
            .ok_or_else(|| SchemaLoadError::NotFound(form_id.clone()))
    }
}

impl SubmissionSink for MemoryStore {
    fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        if let Some(message) = self.rejections.borrow_mut().pop_front() {
            return Err(SubmissionError::rejected(message));
        }
        self.submissions.borrow_mut().push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_form_is_not_found() {
        let store = MemoryStore::new();
        let err = store.fetch_form(&FormId::new("nope")).unwrap_err();
        assert!(matches!(err, SchemaLoadError::NotFound(id) if id.as_str() == "nope"));
        assert_eq!(store.fetches(), vec![FormId::new("nope")]);
    }

    #[test]
    fn scripted_failures_are_consumed_once() {
        let store = MemoryStore::new().with_form(FormDefinition::new("f", "F", Vec::new()));
        store.fail_next_load("maintenance");

        assert!(store.fetch_form(&FormId::new("f")).is_err());
        assert!(store.fetch_form(&FormId::new("f")).is_ok());
    }
}
