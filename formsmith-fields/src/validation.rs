//! Validation rule evaluation.
//!
//! [`evaluate`] maps a field and its current value to an optional failure
//! message. It is pure: the same field and value always yield the same
//! verdict. Bounds are checked by presence, so `min: 0` is a real bound.

use std::collections::{BTreeMap, HashMap};

use crate::ids::FieldId;
use crate::rules::{NumberValidation, TextValidation};
use crate::types::{FieldDefinition, FieldShape, FieldValue};

/// Current value per field id.
pub type ValueMap = HashMap<FieldId, FieldValue>;

/// Failure message per field id. Fields that passed have no entry.
pub type ErrorMap = BTreeMap<FieldId, String>;

/// Check `value` against `field`'s rule. `None` means the field passes.
///
/// A missing value is treated like an empty one. Empty values only face the
/// required check. Length and pattern rules apply to text values of text
/// fields, numeric bounds to number values of number fields; any other
/// pairing only faces the required check.
pub fn evaluate(field: &FieldDefinition, value: Option<&FieldValue>) -> Option<String> {
    let base = field.validation();
    let label = field.label.as_str();
    let fail = |generated: String| Some(base.custom_message().unwrap_or(generated));

    let empty = value.is_none_or(FieldValue::is_empty);
    if empty && base.required {
        return fail(format!("{label} is required"));
    }

    match (&field.shape, value?) {
        (FieldShape::Text { validation }, FieldValue::Text(text)) if !text.is_empty() => {
            check_text(validation, label, text).and_then(fail)
        }
        (FieldShape::Number { validation }, FieldValue::Number(n)) => {
            check_number(validation, label, *n).and_then(fail)
        }
        _ => None,
    }
}

fn check_text(rule: &TextValidation, label: &str, text: &str) -> Option<String> {
    let len = text.chars().count();
    if let Some(min) = rule.min_length {
        if len < min {
            return Some(format!("{label} should be at least {min} characters long"));
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Some(format!("{label} should not exceed {max} characters"));
        }
    }
    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(text) {
            return Some(format!("Invalid {label}"));
        }
    }
    None
}

fn check_number(rule: &NumberValidation, label: &str, n: f64) -> Option<String> {
    if let Some(min) = rule.min {
        if n < min {
            return Some(format!("{label} should be greater than {min}"));
        }
    }
    if let Some(max) = rule.max {
        if n > max {
            return Some(format!("{label} should be less than {max}"));
        }
    }
    None
}

/// Evaluate every field against `values`, collecting all failures.
pub fn validate_all(fields: &[FieldDefinition], values: &ValueMap) -> ErrorMap {
    fields
        .iter()
        .filter_map(|field| {
            evaluate(field, values.get(&field.id)).map(|message| (field.id.clone(), message))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ChoiceValidation, ErrorMessages, Pattern, ValidationBase};
    use crate::types::FieldKind;
    use proptest::prelude::*;
    use rstest::rstest;

    fn required() -> ValidationBase {
        ValidationBase {
            required: true,
            error_messages: None,
        }
    }

    fn text_field(rule: TextValidation) -> FieldDefinition {
        FieldDefinition::with_id("name", "Name", FieldShape::Text { validation: rule })
    }

    fn number_field(rule: NumberValidation) -> FieldDefinition {
        FieldDefinition::with_id("age", "Age", FieldShape::Number { validation: rule })
    }

    fn age_field() -> FieldDefinition {
        number_field(NumberValidation {
            base: required(),
            min: Some(18.0),
            max: Some(60.0),
        })
        .default_value(20.0)
    }

    #[test]
    fn field_without_rules_always_passes() {
        let field = FieldDefinition::with_id("x", "X", FieldShape::blank(FieldKind::Text));
        assert_eq!(evaluate(&field, None), None);
        assert_eq!(evaluate(&field, Some(&"".into())), None);
        assert_eq!(evaluate(&field, Some(&"anything".into())), None);
    }

    #[rstest]
    #[case(FieldKind::Text, FieldValue::from(""))]
    #[case(FieldKind::Select, FieldValue::from(""))]
    #[case(FieldKind::Radio, FieldValue::from(""))]
    #[case(FieldKind::Number, FieldValue::from(0.0))]
    fn required_rejects_empty_equivalents(#[case] kind: FieldKind, #[case] value: FieldValue) {
        let mut shape = FieldShape::blank(kind);
        shape.apply_patch(&crate::rules::ValidationPatch::required(true));
        let field = FieldDefinition::with_id("f", "Field", shape);

        assert_eq!(
            evaluate(&field, Some(&value)).as_deref(),
            Some("Field is required")
        );
        assert_eq!(
            evaluate(&field, None).as_deref(),
            Some("Field is required")
        );
    }

    #[test]
    fn required_accepts_any_non_empty_value() {
        let field = FieldDefinition::with_id(
            "gender",
            "Gender",
            FieldShape::Radio {
                options: vec!["Male".into(), "Female".into()],
                validation: ChoiceValidation { base: required() },
            },
        );
        assert_eq!(evaluate(&field, Some(&"Female".into())), None);
    }

    #[test]
    fn custom_message_replaces_every_default() {
        let field = text_field(TextValidation {
            base: ValidationBase {
                required: true,
                error_messages: Some(ErrorMessages::One("Bad name".into())),
            },
            min_length: Some(3),
            max_length: Some(5),
            pattern: None,
        });
        assert_eq!(evaluate(&field, Some(&"".into())).as_deref(), Some("Bad name"));
        assert_eq!(evaluate(&field, Some(&"ab".into())).as_deref(), Some("Bad name"));
        assert_eq!(
            evaluate(&field, Some(&"abcdefg".into())).as_deref(),
            Some("Bad name")
        );
        assert_eq!(evaluate(&field, Some(&"abcd".into())), None);
    }

    #[test]
    fn custom_message_list_is_joined() {
        let field = number_field(NumberValidation {
            base: ValidationBase {
                required: true,
                error_messages: Some(ErrorMessages::Many(vec![
                    "Age is required".into(),
                    "Age must be between 18 and 60".into(),
                ])),
            },
            min: Some(18.0),
            max: Some(60.0),
        });
        assert_eq!(
            evaluate(&field, Some(&15.0.into())).as_deref(),
            Some("Age is required, Age must be between 18 and 60")
        );
    }

    #[test]
    fn text_checks_short_circuit_in_order() {
        let field = text_field(TextValidation {
            base: ValidationBase::default(),
            min_length: Some(3),
            max_length: Some(5),
            pattern: Some(Pattern::new("^[a-z]+$").unwrap()),
        });
        assert_eq!(
            evaluate(&field, Some(&"A".into())).as_deref(),
            Some("Name should be at least 3 characters long")
        );
        assert_eq!(
            evaluate(&field, Some(&"ABCDEFG".into())).as_deref(),
            Some("Name should not exceed 5 characters")
        );
        assert_eq!(
            evaluate(&field, Some(&"ABCD".into())).as_deref(),
            Some("Invalid Name")
        );
        assert_eq!(evaluate(&field, Some(&"abcd".into())), None);
    }

    #[test]
    fn optional_empty_text_skips_length_rules() {
        let field = text_field(TextValidation {
            min_length: Some(3),
            ..TextValidation::default()
        });
        assert_eq!(evaluate(&field, Some(&"".into())), None);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let field = text_field(TextValidation {
            max_length: Some(3),
            ..TextValidation::default()
        });
        assert_eq!(evaluate(&field, Some(&"äöü".into())), None);
    }

    #[test]
    fn number_bounds() {
        let field = age_field();
        assert_eq!(
            evaluate(&field, Some(&15.0.into())).as_deref(),
            Some("Age should be greater than 18")
        );
        assert_eq!(
            evaluate(&field, Some(&61.0.into())).as_deref(),
            Some("Age should be less than 60")
        );
        assert_eq!(evaluate(&field, Some(&18.0.into())), None);
        assert_eq!(evaluate(&field, Some(&60.0.into())), None);
    }

    #[test]
    fn zero_min_is_a_real_bound() {
        let field = number_field(NumberValidation {
            min: Some(0.0),
            ..NumberValidation::default()
        });
        assert_eq!(evaluate(&field, Some(&0.0.into())), None);
        assert_eq!(
            evaluate(&field, Some(&(-1.0).into())).as_deref(),
            Some("Age should be greater than 0")
        );
    }

    #[test]
    fn zero_value_is_checked_against_bounds() {
        let field = number_field(NumberValidation {
            min: Some(5.0),
            ..NumberValidation::default()
        });
        assert_eq!(
            evaluate(&field, Some(&0.0.into())).as_deref(),
            Some("Age should be greater than 5")
        );
    }

    #[test]
    fn zero_max_is_a_real_bound() {
        let field = number_field(NumberValidation {
            max: Some(0.0),
            ..NumberValidation::default()
        });
        assert_eq!(
            evaluate(&field, Some(&3.0.into())).as_deref(),
            Some("Age should be less than 0")
        );
    }

    #[test]
    fn mismatched_value_only_faces_required() {
        let field = age_field();
        assert_eq!(evaluate(&field, Some(&"twenty".into())), None);
        assert_eq!(
            evaluate(&field, Some(&"".into())).as_deref(),
            Some("Age is required")
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let field = age_field();
        let value = FieldValue::from(15.0);
        assert_eq!(evaluate(&field, Some(&value)), evaluate(&field, Some(&value)));
    }

    #[test]
    fn validate_all_collects_every_failure() {
        let fields = vec![
            age_field(),
            text_field(TextValidation {
                base: required(),
                ..TextValidation::default()
            }),
        ];
        let mut values = ValueMap::new();
        values.insert(FieldId::new("age"), FieldValue::from(15.0));

        let errors = validate_all(&fields, &values);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["age"], "Age should be greater than 18");
        assert_eq!(errors["name"], "Name is required");

        values.insert(FieldId::new("age"), FieldValue::from(20.0));
        values.insert(FieldId::new("name"), FieldValue::from("Ada"));
        assert!(validate_all(&fields, &values).is_empty());
    }

    proptest! {
        #[test]
        fn min_length_boundary_is_inclusive(m in 1usize..40) {
            let field = text_field(TextValidation {
                min_length: Some(m),
                ..TextValidation::default()
            });
            let short = FieldValue::from("x".repeat(m - 1));
            let exact = FieldValue::from("x".repeat(m));
            if m > 1 {
                prop_assert!(evaluate(&field, Some(&short)).is_some());
            }
            prop_assert!(evaluate(&field, Some(&exact)).is_none());
        }
    }
}
