//! # schema-form-html
//!
//! Renders a loaded `FormEngine` as a fillable HTML form.
//!
//! The output mirrors the engine's state: current answers are pre-filled,
//! hidden fields carry the `hidden` attribute and lose `required`, and every
//! conditional field names its dependency in `data-depends-on` so a page
//! script can re-run the rules client-side.
//!
//! ```rust,ignore
//! use schema_form_html::{HtmlOptions, render_form};
//!
//! let html = render_form(&engine, &HtmlOptions::new().with_validation(true))?;
//! std::fs::write("form.html", html)?;
//! ```

mod generator;

pub use generator::{HtmlOptions, render_definition, render_form, to_html};
