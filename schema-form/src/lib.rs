//! # schema-form
//!
//! A conditional dynamic form engine. Backend-agnostic.
//!
//! A form is a declarative list of fields fetched from a schema store. Each
//! field has a type, a required flag, options, and optionally a rule making
//! it visible only for certain answers of another field. The engine keeps
//! the answers, derives visibility after every change, validates
//! required-and-visible fields, and hands a payload to a submission sink.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schema_form::{FormEngine, SchemaStore, SubmissionSink};
//!
//! let mut engine = FormEngine::new();
//! engine.load(&store, "patient-intake")?;
//!
//! engine.set_answer("smoker", "yes")?;
//! engine.set_answer("packs_per_day", "1")?;
//!
//! let result = engine.validate();
//! if result.is_valid() {
//!     let payload = engine.build_submission("patient-intake");
//!     engine.submit(&sink, &payload)?;
//! } else {
//!     println!("Missing: {}", result.labels().join(", "));
//! }
//! ```
//!
//! ## Visibility rules
//!
//! - no rule: always visible
//! - `hideWhenValue` matches the dependency's answer: hidden
//! - otherwise, `showWhenValue` set: visible only on an exact match
//! - otherwise: visible
//!
//! ## Collaborators
//!
//! Stores and sinks implement `SchemaStore` / `SubmissionSink`:
//! - `schema-form-http` - the REST endpoints, over HTTP
//! - `MemoryStore` (this crate) - in memory, for tests and fixtures

// Re-export all types from schema-form-types
pub use schema_form_types::*;

mod engine;
pub use engine::{EngineError, EngineState, FormEngine, LoadTicket, SubmitTicket};

pub mod validation;
pub use validation::{FieldIssue, ValidationResult};

pub mod visibility;
pub use visibility::{compute_visibility, is_visible};

// In-memory store for running forms without a server
mod memory_store;
pub use memory_store::MemoryStore;
