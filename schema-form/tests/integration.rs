//! Integration tests for schema-form

use chrono::{TimeZone, Utc};
use schema_form::{
    AnswerValue, ConditionalRule, EngineError, EngineState, FieldDefinition, FieldId, FieldName,
    FieldOption, FieldType, FormDefinition, FormEngine, MemoryStore, SchemaLoadError,
    SubmissionError,
};

fn registration() -> FormDefinition {
    FormDefinition::new(
        "f1",
        "Registration",
        vec![
            FieldDefinition::new("1", "name", "Name", FieldType::Text).required(),
            FieldDefinition::new("2", "newsletter", "Newsletter", FieldType::Checkbox)
                .with_default("false"),
        ],
    )
}

fn conditional() -> FormDefinition {
    FormDefinition::new(
        "cond",
        "Conditional",
        vec![
            FieldDefinition::new("a", "a", "A", FieldType::Text).required(),
            FieldDefinition::new("b", "b", "B", FieldType::Text)
                .required()
                .with_rule(ConditionalRule::show_when("a", "yes")),
        ],
    )
}

#[test]
fn test_end_to_end_registration() {
    let store = MemoryStore::new().with_form(registration());
    let mut engine = FormEngine::new();

    engine.load(&store, "f1").unwrap();

    let answers = engine.answers();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers.get(&FieldName::new("name")), Some(&AnswerValue::from("")));
    assert_eq!(
        answers.get(&FieldName::new("newsletter")),
        Some(&AnswerValue::from("false"))
    );
    assert!(engine.field_is_visible(&FieldId::new("1")));
    assert!(engine.field_is_visible(&FieldId::new("2")));
    assert_eq!(engine.validate().labels(), vec!["Name"]);

    engine.set_answer("name", "Ana").unwrap();
    assert!(engine.validate().is_valid());

    let at = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
    let payload = engine.build_submission_at("f1", at);
    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "formId": "f1",
            "answers": { "name": "Ana", "newsletter": "false" },
            "submittedAt": "2026-10-17T08:00:00Z"
        })
    );

    engine.submit(&store, &payload).unwrap();
    assert_eq!(engine.state(), EngineState::SubmitSucceeded);
    assert_eq!(store.submissions(), vec![payload]);
}

#[test]
fn test_build_submission_stamps_current_time() {
    let engine = FormEngine::with_definition(registration()).unwrap();
    let before = Utc::now();
    let payload = engine.build_submission("f1");
    assert!(payload.submitted_at >= before);
    assert!(payload.submitted_at <= Utc::now());
}

#[test]
fn test_required_field_validation() {
    let form = FormDefinition::new(
        "ages",
        "Ages",
        vec![FieldDefinition::new("age", "age", "Age", FieldType::Text).required()],
    );
    let mut engine = FormEngine::with_definition(form).unwrap();

    assert_eq!(engine.validate().labels(), vec!["Age"]);
    engine.set_answer("age", "42").unwrap();
    assert_eq!(engine.validate().labels(), Vec::<String>::new());
}

#[test]
fn test_hidden_required_field_is_exempt() {
    let mut engine = FormEngine::with_definition(conditional()).unwrap();

    engine.set_answer("a", "no").unwrap();
    assert!(!engine.field_is_visible(&FieldId::new("b")));
    assert!(engine.validate().is_valid());

    engine.set_answer("a", "yes").unwrap();
    assert_eq!(engine.validate().labels(), vec!["B"]);
}

#[test]
fn test_set_answer_is_idempotent() {
    let mut once = FormEngine::with_definition(conditional()).unwrap();
    let mut twice = FormEngine::with_definition(conditional()).unwrap();

    once.set_answer("a", "yes").unwrap();
    twice.set_answer("a", "yes").unwrap();
    twice.set_answer("a", "yes").unwrap();

    assert_eq!(once.answers(), twice.answers());
    assert_eq!(once.visibility(), twice.visibility());
}

#[test]
fn test_visibility_has_no_memory() {
    let mut engine = FormEngine::with_definition(conditional()).unwrap();
    let initial = engine.visibility().clone();

    engine.set_answer("a", "yes").unwrap();
    engine.set_answer("a", "").unwrap();

    assert_eq!(engine.visibility(), &initial);
    assert_eq!(engine.visibility(), &engine.recompute_visibility());
}

#[test]
fn test_hidden_answers_are_still_submitted() {
    let mut engine = FormEngine::with_definition(conditional()).unwrap();
    engine.set_answer("a", "yes").unwrap();
    engine.set_answer("b", "details").unwrap();
    engine.set_answer("a", "no").unwrap();

    assert!(!engine.field_is_visible(&FieldId::new("b")));
    let payload = engine.build_submission("cond");
    assert_eq!(
        payload.answers.get(&FieldName::new("b")),
        Some(&AnswerValue::from("details"))
    );
}

#[test]
fn test_failed_submission_keeps_answers() {
    let store = MemoryStore::new().with_form(registration());
    let mut engine = FormEngine::new();
    engine.load(&store, "f1").unwrap();
    engine.set_answer("name", "Ana").unwrap();
    let before = engine.answers().clone();

    store.reject_next_submission("Duplicate registration");
    let payload = engine.build_submission("f1");
    let err = engine.submit(&store, &payload).unwrap_err();

    match err {
        EngineError::Submit(SubmissionError::Rejected { message, .. }) => {
            assert_eq!(message, "Duplicate registration");
        }
        other => panic!("Expected a rejected submission, got {other:?}"),
    }
    assert_eq!(engine.state(), EngineState::SubmitFailed);
    assert_eq!(engine.answers(), &before);
    assert!(store.submissions().is_empty());

    // resubmittable without further edits
    engine.submit(&store, &payload).unwrap();
    assert_eq!(store.submissions().len(), 1);
}

#[test]
fn test_load_failure_requires_new_engine() {
    let store = MemoryStore::new().with_form(registration());
    store.fail_next_load("Service unavailable");

    let mut engine = FormEngine::new();
    let err = engine.load(&store, "f1").unwrap_err();
    assert!(matches!(err, EngineError::Load(SchemaLoadError::Rejected { .. })));
    assert_eq!(engine.state(), EngineState::LoadFailed);
    assert!(engine.load(&store, "f1").is_err());
    assert_eq!(store.fetches().len(), 1);

    let mut retry = FormEngine::new();
    retry.load(&store, "f1").unwrap();
    assert_eq!(retry.state(), EngineState::Loaded);
}

#[test]
fn test_load_parses_store_json() {
    let json = serde_json::json!({
        "id": "triage",
        "title": "Triage",
        "fields": [
            {
                "id": "t2", "name": "pain_scale", "label": "Pain (0-10)", "type": "number",
                "required": true, "displayOrder": 2,
                "conditionalRule": { "dependsOnField": "in_pain", "showWhenValue": "true" }
            },
            {
                "id": "t1", "name": "in_pain", "label": "In pain?", "type": "checkbox",
                "defaultValue": false, "displayOrder": 1
            },
            {
                "id": "t3", "name": "symptoms", "label": "Symptoms", "type": "checkboxGroup",
                "options": [
                    { "value": "fever", "label": "Fever" },
                    { "value": "nausea", "label": "Nausea" }
                ],
                "displayOrder": 3
            }
        ]
    });
    let form = FormDefinition::from_json_value(json).unwrap();
    let mut engine = FormEngine::with_definition(form).unwrap();

    let order: Vec<_> = engine
        .definition()
        .unwrap()
        .fields()
        .iter()
        .map(|f| f.name().as_str())
        .collect();
    assert_eq!(order, vec!["in_pain", "pain_scale", "symptoms"]);
    assert!(engine.validate().is_valid());

    engine.set_answer("in_pain", true).unwrap();
    assert_eq!(engine.validate().labels(), vec!["Pain (0-10)"]);

    engine
        .set_answer("symptoms", AnswerValue::set(["fever"]))
        .unwrap();
    let visible: Vec<_> = engine.visible_fields().map(|f| f.id().as_str()).collect();
    assert_eq!(visible, vec!["t1", "t2", "t3"]);
}

#[test]
fn test_hide_rule_on_radio() {
    let form = FormDefinition::new(
        "discharge",
        "Discharge",
        vec![
            FieldDefinition::new("d1", "outcome", "Outcome", FieldType::Radio)
                .required()
                .with_options(vec![
                    FieldOption::new("home", "Home"),
                    FieldOption::new("transfer", "Transfer"),
                    FieldOption::new("deceased", "Deceased"),
                ]),
            FieldDefinition::new("d2", "follow_up", "Follow-up date", FieldType::Date)
                .required()
                .with_rule(ConditionalRule::hide_when("outcome", "deceased")),
        ],
    );
    let mut engine = FormEngine::with_definition(form).unwrap();
    assert_eq!(engine.validate().labels(), vec!["Outcome", "Follow-up date"]);

    engine.set_answer("outcome", "deceased").unwrap();
    assert!(engine.validate().is_valid());

    engine.set_answer("outcome", "home").unwrap();
    assert_eq!(engine.validate().labels(), vec!["Follow-up date"]);
}
