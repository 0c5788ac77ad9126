use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AnswerError, AnswerShape, AnswerValue, FieldId, FieldName};

/// A single field in a form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique key within the form.
    id: FieldId,

    /// The key this field's answer is stored under.
    name: FieldName,

    /// The prompt text shown to the user.
    #[serde(default)]
    label: String,

    /// The kind of input, which fixes the shape of the answer.
    #[serde(rename = "type")]
    field_type: FieldType,

    /// Whether a visible field must be answered before submission.
    #[serde(default)]
    required: bool,

    /// Initial answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_value: Option<AnswerValue>,

    /// Choices for select, radio and checkbox group fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    options: Vec<FieldOption>,

    /// Makes this field's visibility depend on another field's answer.
    #[serde(
        default,
        alias = "conditional_rule",
        skip_serializing_if = "Option::is_none"
    )]
    conditional_rule: Option<ConditionalRule>,

    /// Position in render order.
    #[serde(
        default,
        alias = "display_order",
        skip_serializing_if = "Option::is_none"
    )]
    display_order: Option<i64>,
}

impl FieldDefinition {
    /// Create a new optional field without a default, options or rule.
    pub fn new(
        id: impl Into<FieldId>,
        name: impl Into<FieldName>,
        label: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            label: label.into(),
            field_type,
            required: false,
            default_value: None,
            options: Vec::new(),
            conditional_rule: None,
            display_order: None,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<AnswerValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_rule(mut self, rule: ConditionalRule) -> Self {
        self.conditional_rule = Some(rule);
        self
    }

    pub fn with_display_order(mut self, order: i64) -> Self {
        self.display_order = Some(order);
        self
    }

    pub fn id(&self) -> &FieldId {
        &self.id
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// The display label. Falls back to a title derived from the name.
    pub fn label(&self) -> String {
        if self.label.is_empty() {
            self.name.to_title()
        } else {
            self.label.clone()
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&AnswerValue> {
        self.default_value.as_ref()
    }

    /// The options, or an empty slice for types that ignore them.
    pub fn options(&self) -> &[FieldOption] {
        if self.field_type.has_options() {
            &self.options
        } else {
            &[]
        }
    }

    pub fn conditional_rule(&self) -> Option<&ConditionalRule> {
        self.conditional_rule.as_ref()
    }

    pub fn display_order(&self) -> Option<i64> {
        self.display_order
    }

    /// Whether this field's visibility is driven by the answer stored under `name`.
    pub fn depends_on(&self, name: &FieldName) -> bool {
        self.conditional_rule
            .as_ref()
            .is_some_and(|rule| &rule.depends_on_field == name)
    }

    /// The declared default, converted to a legal answer for this field.
    ///
    /// Checkbox defaults go through the same conversion as typed input, and
    /// a text default on a checkbox group is a comma-separated selection.
    /// `None` when there is no default or it cannot be used.
    pub fn default_answer(&self) -> Option<AnswerValue> {
        let value = self.default_value.as_ref()?;
        match (self.field_type, value) {
            (FieldType::Checkbox | FieldType::CheckboxGroup, AnswerValue::Text(s)) => {
                self.field_type.parse_answer(s).ok()
            }
            (field_type, value) if field_type.admits(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Whether a default is declared but cannot be used.
    pub fn has_unusable_default(&self) -> bool {
        self.default_value.is_some() && self.default_answer().is_none()
    }

    /// The answer this field starts with when a form is loaded.
    ///
    /// A missing or unusable default becomes the empty answer of the
    /// field's shape.
    pub fn initial_answer(&self) -> AnswerValue {
        self.default_answer()
            .unwrap_or_else(|| self.field_type.shape().empty_value())
    }
}

/// The closed set of input kinds a field can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    /// Single-line text input.
    Text,
    Email,
    Tel,
    /// Numeric input, stored as text.
    Number,
    /// Multi-line text.
    Textarea,
    /// Calendar date, stored as text (usually `YYYY-MM-DD`).
    Date,
    /// Drop-down, one option.
    Select,
    /// Radio buttons, one option.
    Radio,
    /// Single checkbox, stored as `"true"` / `"false"`.
    Checkbox,
    /// Several checkboxes, stored as a set of option values.
    #[serde(alias = "checkbox_group")]
    CheckboxGroup,
}

impl FieldType {
    pub const ALL: [FieldType; 10] = [
        Self::Text,
        Self::Email,
        Self::Tel,
        Self::Number,
        Self::Textarea,
        Self::Date,
        Self::Select,
        Self::Radio,
        Self::Checkbox,
        Self::CheckboxGroup,
    ];

    /// The wire name of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::CheckboxGroup => "checkboxGroup",
        }
    }

    /// The legal shape of an answer for this type.
    pub fn shape(self) -> AnswerShape {
        match self {
            Self::CheckboxGroup => AnswerShape::Set,
            Self::Text
            | Self::Email
            | Self::Tel
            | Self::Number
            | Self::Textarea
            | Self::Date
            | Self::Select
            | Self::Radio
            | Self::Checkbox => AnswerShape::Text,
        }
    }

    /// Whether `value` may be stored as an answer for this type.
    ///
    /// Checkboxes hold exactly `"true"` or `"false"`.
    pub fn admits(self, value: &AnswerValue) -> bool {
        match self {
            Self::Checkbox => matches!(value.as_str(), Some("true" | "false")),
            _ => value.shape() == self.shape(),
        }
    }

    /// Whether this type draws its answers from an option list.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::CheckboxGroup)
    }

    /// Convert raw host input (a form post, a command-line value) into an answer.
    pub fn parse_answer(self, input: &str) -> Result<AnswerValue, AnswerError> {
        match self {
            Self::Checkbox => match input.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => Ok(AnswerValue::flag(true)),
                "false" | "no" | "n" | "off" | "0" | "" => Ok(AnswerValue::flag(false)),
                _ => Err(AnswerError::InvalidInput {
                    input: input.to_string(),
                    field_type: self,
                }),
            },
            Self::CheckboxGroup => Ok(AnswerValue::set(
                input.split(',').map(str::trim).filter(|v| !v.is_empty()),
            )),
            Self::Text
            | Self::Email
            | Self::Tel
            | Self::Number
            | Self::Textarea
            | Self::Date
            | Self::Select
            | Self::Radio => Ok(AnswerValue::Text(input.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One choice of a select, radio or checkbox group field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

impl FieldOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// An option whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Conditional visibility rule.
///
/// The field is hidden when the dependency's answer equals `hide_when_value`,
/// and otherwise, when `show_when_value` is set, shown only on an exact match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRule {
    #[serde(alias = "depends_on_field")]
    pub depends_on_field: FieldName,

    #[serde(
        default,
        alias = "show_when_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_when_value: Option<String>,

    #[serde(
        default,
        alias = "hide_when_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_when_value: Option<String>,
}

impl ConditionalRule {
    /// A rule with a dependency but no trigger values (always visible).
    pub fn on(depends_on_field: impl Into<FieldName>) -> Self {
        Self {
            depends_on_field: depends_on_field.into(),
            show_when_value: None,
            hide_when_value: None,
        }
    }

    /// Show only when the dependency equals `value`.
    pub fn show_when(depends_on_field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Self::on(depends_on_field).and_show_when(value)
    }

    /// Hide when the dependency equals `value`.
    pub fn hide_when(depends_on_field: impl Into<FieldName>, value: impl Into<String>) -> Self {
        Self::on(depends_on_field).and_hide_when(value)
    }

    pub fn and_show_when(mut self, value: impl Into<String>) -> Self {
        self.show_when_value = Some(value.into());
        self
    }

    pub fn and_hide_when(mut self, value: impl Into<String>) -> Self {
        self.hide_when_value = Some(value.into());
        self
    }
}
