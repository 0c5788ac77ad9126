//! The form engine: one loaded form, its answers and derived visibility.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::validation::{ValidationResult, validate};
use crate::visibility::{compute_visibility, is_visible, refresh_dependents};
use crate::{
    AnswerError, AnswerValue, Answers, FieldDefinition, FieldId, FieldName, FormDefinition,
    FormId, SchemaIssue, SchemaLoadError, SchemaStore, SubmissionError, SubmissionPayload,
    SubmissionSink, Visibility,
};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Lifecycle of an engine instance.
///
/// `LoadFailed` and `SubmitSucceeded` are terminal. `SubmitFailed` can be
/// edited (which returns it to `Loaded`) or submitted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineState {
    Unloaded,
    Loading,
    Loaded,
    LoadFailed,
    Submitting,
    SubmitSucceeded,
    SubmitFailed,
}

impl EngineState {
    /// Whether answers may be changed in this state.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Loaded | Self::SubmitFailed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::LoadFailed | Self::SubmitSucceeded)
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::LoadFailed => "load-failed",
            Self::Submitting => "submitting",
            Self::SubmitSucceeded => "submitted",
            Self::SubmitFailed => "submit-failed",
        })
    }
}

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("No form is loaded")]
    NotLoaded,

    #[error("Answers cannot be changed while the form is {0}")]
    NotEditable(EngineState),

    #[error("Cannot {operation} while the form is {from}")]
    InvalidTransition {
        from: EngineState,
        operation: &'static str,
    },

    #[error("'{0}' is not a field of this form")]
    UnknownField(FieldName),

    #[error("Field '{name}' takes a {expected} answer, got {actual}")]
    ShapeMismatch {
        name: FieldName,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Result belongs to a superseded or foreign request")]
    StaleTicket,

    #[error(transparent)]
    InvalidAnswer(#[from] AnswerError),

    #[error(transparent)]
    Load(#[from] SchemaLoadError),

    #[error(transparent)]
    Submit(#[from] SubmissionError),
}

/// Proof that a load was started on a particular engine.
///
/// Hand it back to `FormEngine::finish_load` with the store's result. A
/// ticket from another engine, or one superseded by a later `begin_load`,
/// is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a load is only applied through FormEngine::finish_load"]
pub struct LoadTicket {
    instance: u64,
    generation: u64,
    form_id: FormId,
}

impl LoadTicket {
    /// The form this load is for.
    pub fn form_id(&self) -> &FormId {
        &self.form_id
    }
}

/// Proof that a submission was started on a particular engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a submission is only settled through FormEngine::finish_submit"]
pub struct SubmitTicket {
    instance: u64,
    generation: u64,
}

/// A single form being filled in.
///
/// The engine owns the immutable definition, the answer map, and the
/// visibility derived from it. Answers change only through
/// [`FormEngine::set_answer`], after which the visibility of dependent
/// fields is recomputed synchronously.
///
/// Loading and submitting are split into `begin_*` / `finish_*` so a host
/// can run the I/O elsewhere; [`FormEngine::load`] and
/// [`FormEngine::submit`] do both halves in one blocking call.
///
/// The engine is not internally synchronized; a multi-threaded host must
/// serialize mutating calls, e.g. behind a `Mutex`.
#[derive(Debug)]
pub struct FormEngine {
    instance: u64,
    generation: u64,
    state: EngineState,
    definition: Option<FormDefinition>,
    answers: Answers,
    visibility: Visibility,
    last_submit_error: Option<String>,
}

impl Default for FormEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEngine {
    /// Create an engine with no form loaded.
    pub fn new() -> Self {
        Self {
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            state: EngineState::Unloaded,
            definition: None,
            answers: Answers::new(),
            visibility: Visibility::new(),
            last_submit_error: None,
        }
    }

    /// Create an engine already holding `definition`.
    pub fn with_definition(definition: FormDefinition) -> Result<Self, EngineError> {
        let mut engine = Self::new();
        let ticket = engine.begin_load(definition.id.clone())?;
        engine.finish_load(ticket, Ok(definition))?;
        Ok(engine)
    }

    /// Fetch `form_id` from `store` and initialize answers and visibility.
    pub fn load(
        &mut self,
        store: &impl SchemaStore,
        form_id: impl Into<FormId>,
    ) -> Result<&FormDefinition, EngineError> {
        let ticket = self.begin_load(form_id)?;
        let result = store.fetch_form(ticket.form_id());
        self.finish_load(ticket, result)
    }

    /// Start loading `form_id`.
    ///
    /// Allowed while unloaded or while a previous load is still pending; in
    /// the latter case the earlier ticket becomes stale.
    pub fn begin_load(&mut self, form_id: impl Into<FormId>) -> Result<LoadTicket, EngineError> {
        if !matches!(self.state, EngineState::Unloaded | EngineState::Loading) {
            return Err(EngineError::InvalidTransition {
                from: self.state,
                operation: "load",
            });
        }
        self.generation += 1;
        self.state = EngineState::Loading;
        let form_id = form_id.into();
        debug!(form = %form_id, generation = self.generation, "loading form");
        Ok(LoadTicket {
            instance: self.instance,
            generation: self.generation,
            form_id,
        })
    }

    /// Apply the store's answer to a load started with `begin_load`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<FormDefinition, SchemaLoadError>,
    ) -> Result<&FormDefinition, EngineError> {
        if !self.owns(ticket.instance, ticket.generation) || self.state != EngineState::Loading {
            warn!(form = %ticket.form_id, "ignoring stale load result");
            return Err(EngineError::StaleTicket);
        }

        let definition = match result.and_then(checked) {
            Ok(definition) => definition,
            Err(err) => {
                warn!(form = %ticket.form_id, error = %err, "form failed to load");
                self.state = EngineState::LoadFailed;
                return Err(err.into());
            }
        };

        if definition.id != ticket.form_id {
            warn!(
                requested = %ticket.form_id,
                received = %definition.id,
                "store answered with a different form id"
            );
        }

        self.answers = definition
            .fields()
            .iter()
            .map(|field| (field.name().clone(), field.initial_answer()))
            .collect();
        self.visibility = compute_visibility(&definition, &self.answers);
        self.state = EngineState::Loaded;
        info!(
            form = %definition.id,
            fields = definition.len(),
            hidden = self.visibility.hidden().count(),
            "form loaded"
        );

        Ok(&*self.definition.insert(definition))
    }

    /// Set the answer of the field named `name`.
    ///
    /// Fields whose visibility depends on `name` are re-evaluated right away.
    /// The value must have the shape the field's type demands, and a
    /// checkbox takes only `"true"` or `"false"`. Setting the same value
    /// again changes nothing.
    pub fn set_answer(
        &mut self,
        name: impl Into<FieldName>,
        value: impl Into<AnswerValue>,
    ) -> Result<(), EngineError> {
        let name = name.into();
        let value = value.into();
        let definition = editable(&self.definition, self.state)?;

        let field = definition
            .field_by_name(&name)
            .ok_or_else(|| EngineError::UnknownField(name.clone()))?;
        let expected = field.field_type().shape();
        if value.shape() != expected {
            return Err(EngineError::ShapeMismatch {
                name,
                expected: expected.name(),
                actual: value.type_name(),
            });
        }
        if !field.field_type().admits(&value) {
            return Err(AnswerError::InvalidInput {
                input: value.as_str().unwrap_or_default().to_string(),
                field_type: field.field_type(),
            }
            .into());
        }

        debug!(field = %name, "answer changed");
        self.answers.insert(name.clone(), value);
        let flipped = refresh_dependents(definition, &self.answers, &mut self.visibility, &name);
        for id in &flipped {
            debug!(
                field = %id,
                visible = self.visibility.is_visible(id),
                "visibility changed"
            );
        }

        if self.state == EngineState::SubmitFailed {
            self.state = EngineState::Loaded;
        }
        Ok(())
    }

    /// Set an answer from raw text input, converted by the field's type.
    ///
    /// Checkbox input accepts yes/no style words; checkbox groups take a
    /// comma-separated list.
    pub fn set_input(&mut self, name: impl Into<FieldName>, input: &str) -> Result<(), EngineError> {
        let name = name.into();
        let field_type = editable(&self.definition, self.state)?
            .field_by_name(&name)
            .map(FieldDefinition::field_type)
            .ok_or_else(|| EngineError::UnknownField(name.clone()))?;
        let value = field_type.parse_answer(input)?;
        self.set_answer(name, value)
    }

    /// Required, visible fields that are still unanswered.
    ///
    /// An engine with no definition has no fields, so the result is empty
    /// and reports valid. Check `state()` first when that matters.
    pub fn validate(&self) -> ValidationResult {
        match &self.definition {
            Some(definition) => validate(definition, &self.answers, &self.visibility),
            None => ValidationResult::default(),
        }
    }

    /// Assemble a payload of all current answers, stamped now.
    pub fn build_submission(&self, form_id: impl Into<FormId>) -> SubmissionPayload {
        self.build_submission_at(form_id, Utc::now())
    }

    /// Assemble a payload stamped at `submitted_at`.
    ///
    /// Answers of hidden fields are included as they stand.
    pub fn build_submission_at(
        &self,
        form_id: impl Into<FormId>,
        submitted_at: DateTime<Utc>,
    ) -> SubmissionPayload {
        SubmissionPayload::new(form_id, self.answers.clone(), submitted_at)
    }

    /// Deliver `payload` to `sink`. One attempt, no retry.
    ///
    /// On failure the answers are kept and the form stays editable.
    pub fn submit(
        &mut self,
        sink: &impl SubmissionSink,
        payload: &SubmissionPayload,
    ) -> Result<(), EngineError> {
        let ticket = self.begin_submit()?;
        let result = sink.submit(payload);
        self.finish_submit(ticket, result)
    }

    /// Start a submission. Allowed from `Loaded` and `SubmitFailed`.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, EngineError> {
        if !self.state.is_editable() {
            return Err(EngineError::InvalidTransition {
                from: self.state,
                operation: "submit",
            });
        }
        self.generation += 1;
        self.state = EngineState::Submitting;
        Ok(SubmitTicket {
            instance: self.instance,
            generation: self.generation,
        })
    }

    /// Settle a submission started with `begin_submit`.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<(), SubmissionError>,
    ) -> Result<(), EngineError> {
        if !self.owns(ticket.instance, ticket.generation) || self.state != EngineState::Submitting
        {
            warn!("ignoring stale submission result");
            return Err(EngineError::StaleTicket);
        }

        let form = self.form_id().map(ToString::to_string).unwrap_or_default();
        match result {
            Ok(()) => {
                info!(form = %form, "submission accepted");
                self.state = EngineState::SubmitSucceeded;
                self.last_submit_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(form = %form, error = %err, "submission failed");
                self.state = EngineState::SubmitFailed;
                self.last_submit_error = Some(err.message());
                Err(err.into())
            }
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn definition(&self) -> Option<&FormDefinition> {
        self.definition.as_ref()
    }

    pub fn form_id(&self) -> Option<&FormId> {
        self.definition.as_ref().map(|definition| &definition.id)
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answer(&self, name: &FieldName) -> Option<&AnswerValue> {
        self.answers.get(name)
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn field_is_visible(&self, id: &FieldId) -> bool {
        self.visibility.is_visible(id)
    }

    /// The fields currently shown, in render order.
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.definition
            .iter()
            .flat_map(|definition| definition.fields())
            .filter(|field| self.visibility.is_visible(field.id()))
    }

    /// The sink's message from the last failed submission.
    pub fn last_submit_error(&self) -> Option<&str> {
        self.last_submit_error.as_deref()
    }

    /// Recompute visibility of every field from the current answers.
    ///
    /// Always equal to the maintained map; exposed for hosts that want to
    /// assert that.
    pub fn recompute_visibility(&self) -> Visibility {
        match &self.definition {
            Some(definition) => compute_visibility(definition, &self.answers),
            None => Visibility::new(),
        }
    }

    /// Evaluate a single field against the current answers.
    pub fn evaluate(&self, field: &FieldDefinition) -> bool {
        is_visible(field, &self.answers)
    }

    fn owns(&self, instance: u64, generation: u64) -> bool {
        instance == self.instance && generation == self.generation
    }
}

/// The definition, if answers may currently be changed.
fn editable(
    definition: &Option<FormDefinition>,
    state: EngineState,
) -> Result<&FormDefinition, EngineError> {
    match definition {
        Some(definition) if state.is_editable() => Ok(definition),
        Some(_) => Err(EngineError::NotEditable(state)),
        None => Err(EngineError::NotLoaded),
    }
}

/// Reject definitions with fatal structural issues; log the rest.
fn checked(definition: FormDefinition) -> Result<FormDefinition, SchemaLoadError> {
    let (fatal, tolerated): (Vec<SchemaIssue>, Vec<SchemaIssue>) = definition
        .check()
        .into_iter()
        .partition(SchemaIssue::is_fatal);

    for issue in &tolerated {
        warn!(form = %definition.id, %issue, "schema issue");
    }
    if fatal.is_empty() {
        Ok(definition)
    } else {
        Err(SchemaLoadError::InvalidSchema(fatal))
    }
}
