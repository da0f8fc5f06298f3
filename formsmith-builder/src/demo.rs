//! The sample schema shown on the preview tab.

use formsmith_fields::{
    ChoiceValidation, ErrorMessages, FieldDefinition, FieldShape, NumberValidation,
    TextValidation, ValidationBase,
};

fn rule(messages: &[&str]) -> ValidationBase {
    ValidationBase {
        required: true,
        error_messages: Some(ErrorMessages::Many(
            messages.iter().map(|m| m.to_string()).collect(),
        )),
    }
}

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Name, Age, Country and Gender, each required.
pub fn demo_schema() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::with_id(
            "name",
            "Name",
            FieldShape::Text {
                validation: TextValidation {
                    base: rule(&[
                        "Name is required",
                        "Name must be between 3 and 50 characters",
                    ]),
                    min_length: Some(3),
                    max_length: Some(50),
                    pattern: None,
                },
            },
        )
        .placeholder("Enter your name"),
        FieldDefinition::with_id(
            "age",
            "Age",
            FieldShape::Number {
                validation: NumberValidation {
                    base: rule(&["Age is required", "Age must be between 18 and 60"]),
                    min: Some(18.0),
                    max: Some(60.0),
                },
            },
        )
        .placeholder("Enter your age")
        .default_value(20.0),
        FieldDefinition::with_id(
            "country",
            "Country",
            FieldShape::Select {
                options: options(&["USA", "Canada", "India", "Australia"]),
                validation: ChoiceValidation {
                    base: rule(&["Country is required"]),
                },
            },
        )
        .placeholder("Select your country")
        .default_value("India"),
        FieldDefinition::with_id(
            "gender",
            "Gender",
            FieldShape::Radio {
                options: options(&["Male", "Female"]),
                validation: ChoiceValidation {
                    base: rule(&["Gender is required"]),
                },
            },
        )
        .placeholder("Select your gender")
        .default_value("Female"),
    ]
}
