use schema_form::{
    ConditionalRule, FieldDefinition, FieldOption, FieldType, FormDefinition,
};

/// A clinic intake form with two levels of conditional follow-ups.
///
/// - `packs_per_day` shows only for smokers
/// - `allergy_details` shows only when `has_allergies` is `yes`
/// - `pregnancy_weeks` is hidden when `sex` is `male`
pub fn patient_intake() -> FormDefinition {
    FormDefinition::new(
        "patient-intake",
        "Patient Intake",
        vec![
            FieldDefinition::new("pi-1", "full_name", "Full name", FieldType::Text)
                .required()
                .with_display_order(1),
            FieldDefinition::new("pi-2", "date_of_birth", "Date of birth", FieldType::Date)
                .required()
                .with_display_order(2),
            FieldDefinition::new("pi-3", "email", "Email", FieldType::Email).with_display_order(3),
            FieldDefinition::new("pi-4", "phone", "Phone", FieldType::Tel).with_display_order(4),
            FieldDefinition::new("pi-5", "sex", "Sex", FieldType::Select)
                .required()
                .with_options(vec![
                    FieldOption::new("female", "Female"),
                    FieldOption::new("male", "Male"),
                    FieldOption::new("other", "Other"),
                ])
                .with_display_order(5),
            FieldDefinition::new(
                "pi-6",
                "pregnancy_weeks",
                "Weeks pregnant (if applicable)",
                FieldType::Number,
            )
            .with_rule(ConditionalRule::hide_when("sex", "male"))
            .with_display_order(6),
            FieldDefinition::new("pi-7", "smoker", "Do you smoke?", FieldType::Radio)
                .required()
                .with_options(vec![
                    FieldOption::new("yes", "Yes"),
                    FieldOption::new("no", "No"),
                ])
                .with_display_order(7),
            FieldDefinition::new("pi-8", "packs_per_day", "Packs per day", FieldType::Number)
                .required()
                .with_rule(ConditionalRule::show_when("smoker", "yes"))
                .with_display_order(8),
            FieldDefinition::new("pi-9", "has_allergies", "Any allergies?", FieldType::Checkbox)
                .with_default(false)
                .with_display_order(9),
            FieldDefinition::new(
                "pi-10",
                "allergy_details",
                "Describe your allergies",
                FieldType::Textarea,
            )
            .required()
            .with_rule(ConditionalRule::show_when("has_allergies", "true"))
            .with_display_order(10),
            FieldDefinition::new("pi-11", "symptoms", "Current symptoms", FieldType::CheckboxGroup)
                .with_options(vec![
                    FieldOption::new("fever", "Fever"),
                    FieldOption::new("cough", "Cough"),
                    FieldOption::new("headache", "Headache"),
                    FieldOption::new("fatigue", "Fatigue"),
                ])
                .with_display_order(11),
        ],
    )
    .with_description("Please complete before your first appointment.")
    .with_submit_label("Register")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_is_sound() {
        assert!(patient_intake().check().is_empty());
    }
}
