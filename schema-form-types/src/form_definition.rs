use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{FieldDefinition, FieldId, FieldName, FormId, SchemaIssue, SchemaLoadError};

/// The top-level structure describing a form: metadata plus ordered fields.
///
/// A definition is presentation-agnostic. Fields are kept in render order:
/// ascending `displayOrder`, ties (and fields without an order, which come
/// last) in the order the store sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FormDefinitionWire")]
pub struct FormDefinition {
    pub id: FormId,

    pub title: String,

    pub description: String,

    /// Optional override text for the submit action.
    #[serde(skip_serializing_if = "Option::is_none")]
    submit_label: Option<String>,

    fields: Vec<FieldDefinition>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormDefinitionWire {
    id: FormId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "submit_label")]
    submit_label: Option<String>,
    fields: Vec<FieldDefinition>,
}

impl From<FormDefinitionWire> for FormDefinition {
    fn from(wire: FormDefinitionWire) -> Self {
        Self::new(wire.id, wire.title, wire.fields)
            .with_description(wire.description.unwrap_or_default())
            .with_submit_label_opt(wire.submit_label)
    }
}

impl FormDefinition {
    /// Create a definition; `fields` are put into render order.
    pub fn new(
        id: impl Into<FormId>,
        title: impl Into<String>,
        mut fields: Vec<FieldDefinition>,
    ) -> Self {
        // stable: equal keys keep their original sequence
        fields.sort_by_key(|field| match field.display_order() {
            Some(order) => (false, order),
            None => (true, 0),
        });
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            submit_label: None,
            fields,
        }
    }

    /// Parse the `data` member of a schema store response.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SchemaLoadError> {
        if !value.get("fields").is_some_and(serde_json::Value::is_array) {
            return Err(SchemaLoadError::MissingFields);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = Some(label.into());
        self
    }

    fn with_submit_label_opt(mut self, label: Option<String>) -> Self {
        self.submit_label = label;
        self
    }

    /// The fields, in render order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.id() == id)
    }

    pub fn field_by_name(&self, name: &FieldName) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Fields whose conditional rule depends on the answer stored under `name`.
    pub fn dependents_of<'a, 'n>(
        &'a self,
        name: &'n FieldName,
    ) -> impl Iterator<Item = &'a FieldDefinition> + use<'a, 'n> {
        self.fields.iter().filter(move |field| field.depends_on(name))
    }

    /// The text of the submit action.
    pub fn submit_label(&self) -> &str {
        self.submit_label.as_deref().unwrap_or("Submit")
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Structural problems with this definition.
    ///
    /// Issues for which `SchemaIssue::is_fatal` holds make a form unusable.
    pub fn check(&self) -> Vec<SchemaIssue> {
        let mut issues = Vec::new();
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for field in &self.fields {
            if !ids.insert(field.id()) {
                issues.push(SchemaIssue::DuplicateId(field.id().clone()));
            }
            if !names.insert(field.name()) {
                issues.push(SchemaIssue::DuplicateName(field.name().clone()));
            }
            if field.field_type().has_options() && field.options().is_empty() {
                issues.push(SchemaIssue::MissingOptions {
                    field: field.id().clone(),
                    field_type: field.field_type(),
                });
            }
            if field.has_unusable_default() {
                issues.push(SchemaIssue::UnusableDefault {
                    field: field.id().clone(),
                    field_type: field.field_type(),
                });
            }
        }

        for field in &self.fields {
            if let Some(rule) = field.conditional_rule()
                && !names.contains(&rule.depends_on_field)
            {
                issues.push(SchemaIssue::UnknownDependency {
                    field: field.id().clone(),
                    depends_on: rule.depends_on_field.clone(),
                });
            }
        }

        issues
    }
}
