//! Sample form definitions shared by tests, demos and the CLI.

pub mod account_settings;
pub mod consultation_note;
pub mod patient_intake;

pub use account_settings::account_settings;
pub use consultation_note::{CONSULTATION_NOTE_JSON, consultation_note};
pub use patient_intake::patient_intake;

use schema_form::{MemoryStore, SchemaLoadError};

/// A store serving every sample form.
pub fn sample_store() -> Result<MemoryStore, SchemaLoadError> {
    Ok(MemoryStore::new()
        .with_form(patient_intake())
        .with_form(consultation_note()?)
        .with_form(account_settings()))
}
