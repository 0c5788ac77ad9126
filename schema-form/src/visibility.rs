//! Visibility rules: which fields are shown for a given set of answers.

use crate::{Answers, FieldDefinition, FieldId, FieldName, FormDefinition, Visibility};

/// Whether `field` is visible given `answers`.
///
/// A field without a rule is always visible. Otherwise the answer stored
/// under the rule's dependency is compared, by exact equality, against the
/// rule's trigger values: a `hide_when_value` match hides the field even if
/// `show_when_value` matches too; a set `show_when_value` shows the field
/// only on a match; a rule with neither value shows it.
pub fn is_visible(field: &FieldDefinition, answers: &Answers) -> bool {
    let Some(rule) = field.conditional_rule() else {
        return true;
    };

    let answered = |expected: &str| {
        answers
            .get(&rule.depends_on_field)
            .is_some_and(|value| value.equals_text(expected))
    };

    if let Some(hide) = &rule.hide_when_value
        && answered(hide.as_str())
    {
        return false;
    }

    match &rule.show_when_value {
        Some(show) => answered(show.as_str()),
        None => true,
    }
}

/// Derive the visibility of every field from scratch.
pub fn compute_visibility(definition: &FormDefinition, answers: &Answers) -> Visibility {
    definition
        .fields()
        .iter()
        .map(|field| (field.id().clone(), is_visible(field, answers)))
        .collect()
}

/// Re-evaluate only the fields that depend on `changed`.
///
/// Returns the ids whose visibility flipped. Entries of other fields are
/// left untouched; since `is_visible` only reads `answers`, the result is
/// the same as `compute_visibility`.
pub fn refresh_dependents(
    definition: &FormDefinition,
    answers: &Answers,
    visibility: &mut Visibility,
    changed: &FieldName,
) -> Vec<FieldId> {
    let mut flipped = Vec::new();
    for field in definition.dependents_of(changed) {
        let visible = is_visible(field, answers);
        if visibility.set(field.id().clone(), visible) != Some(visible) {
            flipped.push(field.id().clone());
        }
    }
    flipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnswerValue, ConditionalRule, FieldType};

    fn field_with(rule: Option<ConditionalRule>) -> FieldDefinition {
        let field = FieldDefinition::new("target", "target", "Target", FieldType::Text);
        match rule {
            Some(rule) => field.with_rule(rule),
            None => field,
        }
    }

    fn answers(dep: &str, value: impl Into<AnswerValue>) -> Answers {
        let mut answers = Answers::new();
        answers.insert(dep, value);
        answers
    }

    #[test]
    fn no_rule_is_always_visible() {
        let field = field_with(None);
        assert!(is_visible(&field, &Answers::new()));
        assert!(is_visible(&field, &answers("anything", "x")));
        assert!(is_visible(&field, &answers("target", "")));
    }

    #[test]
    fn hide_wins_over_show() {
        let rule = ConditionalRule::show_when("dep", "x").and_hide_when("x");
        let field = field_with(Some(rule));
        assert!(!is_visible(&field, &answers("dep", "x")));
    }

    #[test]
    fn show_requires_exact_match() {
        let field = field_with(Some(ConditionalRule::show_when("dep", "y")));
        assert!(!is_visible(&field, &answers("dep", "z")));
        assert!(!is_visible(&field, &answers("dep", "Y")));
        assert!(!is_visible(&field, &answers("dep", "y ")));
        assert!(is_visible(&field, &answers("dep", "y")));
    }

    #[test]
    fn show_rule_with_missing_dependency_hides() {
        let field = field_with(Some(ConditionalRule::show_when("dep", "y")));
        assert!(!is_visible(&field, &Answers::new()));
    }

    #[test]
    fn hide_rule_with_missing_dependency_shows() {
        let field = field_with(Some(ConditionalRule::hide_when("dep", "y")));
        assert!(is_visible(&field, &Answers::new()));
        assert!(is_visible(&field, &answers("dep", "n")));
        assert!(!is_visible(&field, &answers("dep", "y")));
    }

    #[test]
    fn set_answers_never_match() {
        let field = field_with(Some(ConditionalRule::show_when("dep", "y")));
        assert!(!is_visible(&field, &answers("dep", vec!["y"])));

        let field = field_with(Some(ConditionalRule::hide_when("dep", "y")));
        assert!(is_visible(&field, &answers("dep", vec!["y"])));
    }

    #[test]
    fn rule_without_values_is_visible() {
        let field = field_with(Some(ConditionalRule::on("dep")));
        assert!(is_visible(&field, &answers("dep", "whatever")));
    }

    #[test]
    fn refresh_matches_full_recompute() {
        let definition = FormDefinition::new(
            "f",
            "Form",
            vec![
                FieldDefinition::new("a", "smoker", "Smoker", FieldType::Checkbox),
                FieldDefinition::new("b", "packs", "Packs", FieldType::Number)
                    .with_rule(ConditionalRule::show_when("smoker", "true")),
                FieldDefinition::new("c", "notes", "Notes", FieldType::Textarea),
            ],
        );
        let mut current = answers("smoker", "false");
        let mut visibility = compute_visibility(&definition, &current);
        assert!(!visibility.is_visible(&FieldId::new("b")));

        current.insert("smoker", "true");
        let flipped = refresh_dependents(
            &definition,
            &current,
            &mut visibility,
            &FieldName::new("smoker"),
        );

        assert_eq!(flipped, vec![FieldId::new("b")]);
        assert_eq!(visibility, compute_visibility(&definition, &current));
    }
}
