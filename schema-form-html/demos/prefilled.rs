//! Prefilled - render a partly answered form with a validation summary.
//!
//! Run with: cargo run -p schema-form-html --example prefilled

use example_forms::sample_store;
use schema_form::FormEngine;
use schema_form_html::{HtmlOptions, render_form};

fn main() -> anyhow::Result<()> {
    let store = sample_store()?;
    let mut engine = FormEngine::new();
    engine.load(&store, "consultation-note")?;

    engine.set_answer("chief_complaint", "Recurring chest pain")?;
    engine.set_answer("outcome", "referred")?;

    let options = HtmlOptions::new()
        .with_title("Consultation (draft)")
        .with_validation(true);
    let html = render_form(&engine, &options)?;
    std::fs::write("consultation_draft.html", &html)?;

    println!("Generated consultation_draft.html");
    Ok(())
}
