//! Patient intake - render a freshly loaded form.
//!
//! Run with: cargo run -p schema-form-html --example patient_intake

use example_forms::sample_store;
use schema_form::FormEngine;
use schema_form_html::to_html;

fn main() -> anyhow::Result<()> {
    let store = sample_store()?;
    let mut engine = FormEngine::new();
    engine.load(&store, "patient-intake")?;

    let html = to_html(&engine, None)?;
    std::fs::write("patient_intake.html", &html)?;

    println!("Generated patient_intake.html");
    Ok(())
}
