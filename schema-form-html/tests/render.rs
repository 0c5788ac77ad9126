//! Rendering the sample forms.

use example_forms::{account_settings, consultation_note, patient_intake};
use schema_form::FormEngine;
use schema_form_html::{HtmlOptions, render_form};

fn fragment() -> HtmlOptions {
    HtmlOptions::new().full_document(false)
}

#[test]
fn every_field_type_renders() {
    let engine = FormEngine::with_definition(patient_intake()).unwrap();
    let html = render_form(&engine, &fragment()).unwrap();

    assert!(html.contains("<input type=\"text\" id=\"form-pi-1\" name=\"full_name\""));
    assert!(html.contains("<input type=\"date\" id=\"form-pi-2\""));
    assert!(html.contains("<input type=\"email\" id=\"form-pi-3\""));
    assert!(html.contains("<input type=\"tel\" id=\"form-pi-4\""));
    assert!(html.contains("<select id=\"form-pi-5\" name=\"sex\""));
    assert!(html.contains("<input type=\"number\" id=\"form-pi-6\""));
    assert!(html.contains("<input type=\"radio\" id=\"form-pi-7-0\" name=\"smoker\" value=\"yes\""));
    assert!(html.contains("<input type=\"checkbox\" id=\"form-pi-9\" name=\"has_allergies\" value=\"true\">"));
    assert!(html.contains("<textarea id=\"form-pi-10\""));
    assert!(html.contains("name=\"symptoms[]\" value=\"fever\">"));
    assert!(html.contains(">Register</button>"));
    assert!(html.contains("Please complete before your first appointment."));
}

#[test]
fn conditional_fields_follow_answers() {
    let mut engine = FormEngine::with_definition(patient_intake()).unwrap();
    let html = render_form(&engine, &fragment()).unwrap();
    assert!(html.contains("data-field-id=\"pi-8\" data-field-type=\"number\" data-depends-on=\"smoker\" data-show-when=\"yes\" hidden>"));

    engine.set_answer("smoker", "yes").unwrap();
    let html = render_form(&engine, &fragment()).unwrap();
    assert!(html.contains("data-field-id=\"pi-8\" data-field-type=\"number\" data-depends-on=\"smoker\" data-show-when=\"yes\">"));
    assert!(html.contains("name=\"packs_per_day\" class=\"form-input\" value=\"\" required>"));
}

#[test]
fn store_fixture_renders_with_custom_prefix() {
    let engine = FormEngine::with_definition(consultation_note().unwrap()).unwrap();
    let options = fragment().with_class_prefix("note");
    let html = render_form(&engine, &options).unwrap();

    assert!(html.starts_with("<form class=\"note-form\" data-form-id=\"consultation-note\">"));
    assert!(html.contains("id=\"note-101\""));
    assert!(html.contains(">Save note</button>"));
    // follow-up date is visible until the outcome is "discharged"
    assert!(html.contains("data-hide-when=\"discharged\">"));
}

#[test]
fn selected_values_are_marked() {
    let mut engine = FormEngine::with_definition(account_settings()).unwrap();
    engine.set_answer("notifications", "digest").unwrap();
    engine.set_answer("digest_frequency", "weekly").unwrap();

    let html = render_form(&engine, &fragment()).unwrap();
    assert!(html.contains("<option value=\"digest\" selected>Digest only</option>"));
    assert!(html.contains("value=\"weekly\" checked required>"));
    assert!(html.contains("name=\"channels[]\" value=\"email\" checked>"));
    assert!(html.contains("name=\"channels[]\" value=\"sms\">"));
}
