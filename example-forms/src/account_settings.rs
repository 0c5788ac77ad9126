use schema_form::{
    ConditionalRule, FieldDefinition, FieldOption, FieldType, FormDefinition,
};

/// Account preferences. Fields have no `displayOrder` and keep their order.
///
/// `digest_frequency` has both a show and a hide value on the same
/// dependency; hide wins.
pub fn account_settings() -> FormDefinition {
    FormDefinition::new(
        "account-settings",
        "Account Settings",
        vec![
            FieldDefinition::new("as-1", "display_name", "", FieldType::Text).required(),
            FieldDefinition::new("as-2", "notifications", "Notifications", FieldType::Select)
                .required()
                .with_options(vec![
                    FieldOption::new("all", "Everything"),
                    FieldOption::new("digest", "Digest only"),
                    FieldOption::new("none", "Nothing"),
                ])
                .with_default("all"),
            FieldDefinition::new("as-3", "digest_frequency", "Digest frequency", FieldType::Radio)
                .required()
                .with_options(vec![
                    FieldOption::plain("daily"),
                    FieldOption::plain("weekly"),
                ])
                .with_rule(ConditionalRule::show_when("notifications", "digest").and_hide_when("none")),
            FieldDefinition::new("as-4", "channels", "Channels", FieldType::CheckboxGroup)
                .with_options(vec![
                    FieldOption::new("email", "Email"),
                    FieldOption::new("sms", "SMS"),
                    FieldOption::new("push", "Push"),
                ])
                .with_default(vec!["email"])
                .with_rule(ConditionalRule::hide_when("notifications", "none")),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_label_falls_back_to_name() {
        let form = account_settings();
        assert_eq!(form.fields()[0].label(), "Display Name");
        assert!(form.check().is_empty());
    }
}
