//! HTML form generator implementation.

use schema_form::{
    Answers, EngineError, FieldDefinition, FieldType, FormDefinition, FormEngine, Visibility,
    validation::validate,
};

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Title for the HTML document. Defaults to the form's own title.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// Custom CSS class prefix for all generated elements.
    pub class_prefix: String,
    /// Whether to list missing required fields above the form.
    pub show_validation: bool,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            class_prefix: "form".to_string(),
            show_validation: false,
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Generate a complete HTML document or just the form fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set a custom CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    /// List missing required fields above the form.
    pub fn with_validation(mut self, show: bool) -> Self {
        self.show_validation = show;
        self
    }
}

/// Render a loaded engine with default options and an optional title.
pub fn to_html(engine: &FormEngine, title: Option<&str>) -> Result<String, EngineError> {
    let mut options = HtmlOptions::new();
    if let Some(t) = title {
        options.title = Some(t.to_string());
    }
    render_form(engine, &options)
}

/// Render the engine's form, answers and visibility.
///
/// Fails with `EngineError::NotLoaded` if no definition is loaded.
pub fn render_form(engine: &FormEngine, options: &HtmlOptions) -> Result<String, EngineError> {
    let definition = engine.definition().ok_or(EngineError::NotLoaded)?;
    Ok(render_definition(
        definition,
        engine.answers(),
        engine.visibility(),
        options,
    ))
}

/// Render a definition against explicit answers and visibility.
pub fn render_definition(
    definition: &FormDefinition,
    answers: &Answers,
    visibility: &Visibility,
    options: &HtmlOptions,
) -> String {
    let mut html = String::new();
    let prefix = &options.class_prefix;
    let title = options.title.as_deref().unwrap_or(&definition.title);

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));

        if options.include_styles {
            html.push_str(&generate_styles(prefix));
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!(
        "<form class=\"{prefix}-form\" data-form-id=\"{}\">\n",
        escape_html(definition.id.as_str())
    ));
    html.push_str(&format!(
        "  <h1 class=\"{prefix}-title\">{}</h1>\n",
        escape_html(title)
    ));

    if !definition.description.is_empty() {
        html.push_str(&format!(
            "  <div class=\"{prefix}-description\">{}</div>\n",
            escape_html(&definition.description)
        ));
    }

    if options.show_validation {
        let result = validate(definition, answers, visibility);
        if !result.is_valid() {
            html.push_str(&format!("  <ul class=\"{prefix}-errors\">\n"));
            for issue in result.issues() {
                html.push_str(&format!(
                    "    <li data-field-id=\"{}\">{} is required</li>\n",
                    escape_html(issue.field_id.as_str()),
                    escape_html(&issue.label)
                ));
            }
            html.push_str("  </ul>\n");
        }
    }

    html.push_str(&format!("  <div class=\"{prefix}-fields\">\n"));
    for field in definition.fields() {
        let visible = visibility.is_visible(field.id());
        html.push_str(&generate_field(field, answers, visible, prefix, 2));
    }
    html.push_str("  </div>\n");

    html.push_str(&format!(
        "  <button type=\"submit\" class=\"{prefix}-submit\">{}</button>\n",
        escape_html(definition.submit_label())
    ));

    html.push_str("</form>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

/// Generate HTML for a single field.
fn generate_field(
    field: &FieldDefinition,
    answers: &Answers,
    visible: bool,
    prefix: &str,
    indent: usize,
) -> String {
    let ind = "  ".repeat(indent);
    let name = escape_html(field.name().as_str());
    let element_id = format!("{prefix}-{}", sanitize_id(field.id().as_str()));
    let label = escape_html(&field.label());
    let answer = answers.get(field.name());
    let text = answer.and_then(|a| a.as_str()).unwrap_or_default();

    // hidden fields are never required by the browser
    let required = if field.is_required() && visible {
        " required"
    } else {
        ""
    };
    let marker = if field.is_required() {
        format!(" <span class=\"{prefix}-required\">*</span>")
    } else {
        String::new()
    };

    let mut wrapper_attrs = format!(
        " data-field-id=\"{}\" data-field-type=\"{}\"",
        escape_html(field.id().as_str()),
        field.field_type()
    );
    if let Some(rule) = field.conditional_rule() {
        wrapper_attrs.push_str(&format!(
            " data-depends-on=\"{}\"",
            escape_html(rule.depends_on_field.as_str())
        ));
        if let Some(show) = &rule.show_when_value {
            wrapper_attrs.push_str(&format!(" data-show-when=\"{}\"", escape_html(show)));
        }
        if let Some(hide) = &rule.hide_when_value {
            wrapper_attrs.push_str(&format!(" data-hide-when=\"{}\"", escape_html(hide)));
        }
    }
    if !visible {
        wrapper_attrs.push_str(" hidden");
    }

    let mut html = String::new();

    match field.field_type() {
        FieldType::Text
        | FieldType::Email
        | FieldType::Tel
        | FieldType::Number
        | FieldType::Date => {
            let input_type = field.field_type().as_str();
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-field\"{wrapper_attrs}>\n"
            ));
            html.push_str(&format!(
                "{ind}  <label for=\"{element_id}\">{label}{marker}</label>\n"
            ));
            html.push_str(&format!(
                "{ind}  <input type=\"{input_type}\" id=\"{element_id}\" name=\"{name}\" class=\"{prefix}-input\" value=\"{}\"{required}>\n",
                escape_html(text)
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }

        FieldType::Textarea => {
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-field\"{wrapper_attrs}>\n"
            ));
            html.push_str(&format!(
                "{ind}  <label for=\"{element_id}\">{label}{marker}</label>\n"
            ));
            html.push_str(&format!(
                "{ind}  <textarea id=\"{element_id}\" name=\"{name}\" rows=\"4\" class=\"{prefix}-textarea\"{required}>{}</textarea>\n",
                escape_html(text)
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }

        FieldType::Select => {
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-field\"{wrapper_attrs}>\n"
            ));
            html.push_str(&format!(
                "{ind}  <label for=\"{element_id}\">{label}{marker}</label>\n"
            ));
            html.push_str(&format!(
                "{ind}  <select id=\"{element_id}\" name=\"{name}\" class=\"{prefix}-select\"{required}>\n"
            ));
            let placeholder = if text.is_empty() { " selected" } else { "" };
            html.push_str(&format!(
                "{ind}    <option value=\"\"{placeholder}>Select...</option>\n"
            ));
            for option in field.options() {
                let selected = if option.value == text { " selected" } else { "" };
                html.push_str(&format!(
                    "{ind}    <option value=\"{}\"{selected}>{}</option>\n",
                    escape_html(&option.value),
                    escape_html(&option.label)
                ));
            }
            html.push_str(&format!("{ind}  </select>\n"));
            html.push_str(&format!("{ind}</div>\n"));
        }

        FieldType::Radio => {
            html.push_str(&format!(
                "{ind}<fieldset class=\"{prefix}-fieldset {prefix}-radio\"{wrapper_attrs}>\n"
            ));
            html.push_str(&format!("{ind}  <legend>{label}{marker}</legend>\n"));
            for (idx, option) in field.options().iter().enumerate() {
                let option_id = format!("{element_id}-{idx}");
                let checked = if option.value == text { " checked" } else { "" };
                html.push_str(&format!("{ind}  <div class=\"{prefix}-radio-option\">\n"));
                html.push_str(&format!(
                    "{ind}    <input type=\"radio\" id=\"{option_id}\" name=\"{name}\" value=\"{}\"{checked}{required}>\n",
                    escape_html(&option.value)
                ));
                html.push_str(&format!(
                    "{ind}    <label for=\"{option_id}\">{}</label>\n",
                    escape_html(&option.label)
                ));
                html.push_str(&format!("{ind}  </div>\n"));
            }
            html.push_str(&format!("{ind}</fieldset>\n"));
        }

        FieldType::Checkbox => {
            let checked = if answer.is_some_and(|a| a.is_checked()) {
                " checked"
            } else {
                ""
            };
            html.push_str(&format!(
                "{ind}<div class=\"{prefix}-field {prefix}-checkbox\"{wrapper_attrs}>\n"
            ));
            html.push_str(&format!(
                "{ind}  <input type=\"checkbox\" id=\"{element_id}\" name=\"{name}\" value=\"true\"{checked}{required}>\n"
            ));
            html.push_str(&format!(
                "{ind}  <label for=\"{element_id}\">{label}{marker}</label>\n"
            ));
            html.push_str(&format!("{ind}</div>\n"));
        }

        FieldType::CheckboxGroup => {
            html.push_str(&format!(
                "{ind}<fieldset class=\"{prefix}-fieldset {prefix}-group\"{wrapper_attrs}>\n"
            ));
            html.push_str(&format!("{ind}  <legend>{label}{marker}</legend>\n"));
            for (idx, option) in field.options().iter().enumerate() {
                let option_id = format!("{element_id}-{idx}");
                let checked = if answer.is_some_and(|a| a.contains_option(&option.value)) {
                    " checked"
                } else {
                    ""
                };
                html.push_str(&format!(
                    "{ind}  <div class=\"{prefix}-checkbox-option\">\n"
                ));
                html.push_str(&format!(
                    "{ind}    <input type=\"checkbox\" id=\"{option_id}\" name=\"{name}[]\" value=\"{}\"{checked}>\n",
                    escape_html(&option.value)
                ));
                html.push_str(&format!(
                    "{ind}    <label for=\"{option_id}\">{}</label>\n",
                    escape_html(&option.label)
                ));
                html.push_str(&format!("{ind}  </div>\n"));
            }
            html.push_str(&format!("{ind}</fieldset>\n"));
        }
    }

    html
}

/// Reduce an id to characters safe in an HTML id attribute.
fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"  <style>
    .{prefix}-form {{
      max-width: 600px;
      margin: 2rem auto;
      padding: 1rem;
      font-family: sans-serif;
    }}
    .{prefix}-description {{
      margin: 1rem 0;
      padding: 0.5rem;
      background: #f5f5f5;
      white-space: pre-wrap;
    }}
    .{prefix}-errors {{
      color: #b00020;
    }}
    .{prefix}-required {{
      color: #b00020;
    }}
    .{prefix}-field {{
      margin: 0.5rem 0;
    }}
    .{prefix}-field label {{
      display: block;
      margin-bottom: 0.25rem;
    }}
    .{prefix}-input, .{prefix}-textarea, .{prefix}-select {{
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
    }}
    .{prefix}-checkbox {{
      display: flex;
      align-items: center;
      gap: 0.5rem;
    }}
    .{prefix}-checkbox label {{
      display: inline;
    }}
    .{prefix}-fieldset {{
      margin: 1rem 0;
      padding: 1rem;
    }}
    .{prefix}-radio-option, .{prefix}-checkbox-option {{
      margin: 0.25rem 0;
    }}
    .{prefix}-submit {{
      margin-top: 1rem;
      padding: 0.5rem 1rem;
    }}
  </style>
"#
    )
}
