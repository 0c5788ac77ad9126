//! Required-field validation.

use crate::{Answers, FieldDefinition, FieldId, FormDefinition, Visibility};

/// A required, visible field that has no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field_id: FieldId,
    pub label: String,
}

/// The outcome of validating a form. Empty means the form may be submitted.
///
/// Validation never fails with an error; a failing form is simply a
/// non-empty list of issues, in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    issues: Vec<FieldIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Labels of the missing fields, as shown to the user.
    pub fn labels(&self) -> Vec<String> {
        self.issues.iter().map(|issue| issue.label.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl IntoIterator for ValidationResult {
    type Item = FieldIssue;
    type IntoIter = std::vec::IntoIter<FieldIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

/// Whether a missing answer for `field` blocks submission.
fn is_missing(field: &FieldDefinition, answers: &Answers, visibility: &Visibility) -> bool {
    field.is_required() && visibility.is_visible(field.id()) && !answers.has_value(field.name())
}

/// Collect every required field that is visible and unanswered.
///
/// Hidden fields are exempt whatever they hold. An answer is missing when it
/// is absent, the empty string, or the empty set.
pub fn validate(
    definition: &FormDefinition,
    answers: &Answers,
    visibility: &Visibility,
) -> ValidationResult {
    let issues = definition
        .fields()
        .iter()
        .filter(|field| is_missing(field, answers, visibility))
        .map(|field| FieldIssue {
            field_id: field.id().clone(),
            label: field.label(),
        })
        .collect();
    ValidationResult { issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::compute_visibility;
    use crate::{ConditionalRule, FieldType};

    #[test]
    fn required_empty_field_is_reported() {
        let definition = FormDefinition::new(
            "f",
            "Form",
            vec![FieldDefinition::new("age", "age", "Age", FieldType::Number).required()],
        );
        let mut answers = Answers::new();
        answers.insert("age", "");
        let visibility = compute_visibility(&definition, &answers);

        assert_eq!(validate(&definition, &answers, &visibility).labels(), vec!["Age"]);

        answers.insert("age", "42");
        assert!(validate(&definition, &answers, &visibility).is_valid());
    }

    #[test]
    fn hidden_required_field_is_exempt() {
        let definition = FormDefinition::new(
            "f",
            "Form",
            vec![
                FieldDefinition::new("a", "a", "A", FieldType::Text).required(),
                FieldDefinition::new("b", "b", "B", FieldType::Text)
                    .required()
                    .with_rule(ConditionalRule::show_when("a", "yes")),
            ],
        );
        let mut answers = Answers::new();
        answers.insert("a", "no");
        answers.insert("b", "");
        let visibility = compute_visibility(&definition, &answers);

        assert!(validate(&definition, &answers, &visibility).is_valid());
    }

    #[test]
    fn empty_set_counts_as_missing() {
        let definition = FormDefinition::new(
            "f",
            "Form",
            vec![
                FieldDefinition::new("s", "symptoms", "Symptoms", FieldType::CheckboxGroup)
                    .required()
                    .with_options(vec![crate::FieldOption::plain("fever")]),
            ],
        );
        let mut answers = Answers::new();
        answers.insert("symptoms", Vec::<String>::new());
        let visibility = compute_visibility(&definition, &answers);
        assert_eq!(validate(&definition, &answers, &visibility).len(), 1);

        answers.insert("symptoms", vec!["fever"]);
        assert!(validate(&definition, &answers, &visibility).is_valid());
    }

    #[test]
    fn absent_answer_counts_as_missing() {
        let definition = FormDefinition::new(
            "f",
            "Form",
            vec![FieldDefinition::new("n", "name", "", FieldType::Text).required()],
        );
        let answers = Answers::new();
        let visibility = compute_visibility(&definition, &answers);

        let result = validate(&definition, &answers, &visibility);
        assert_eq!(result.labels(), vec!["Name"]);
        assert_eq!(result.issues()[0].field_id, FieldId::new("n"));
    }
}
