//! File-backed schema storage across reopen.

use formsmith_config::FormsConfig;
use formsmith_fields::{
    ErrorMessages, FieldDefinition, FieldShape, NumberValidation, Pattern, TextValidation,
    ValidationBase,
};
use formsmith_store::FormStorage;
use tempfile::TempDir;

fn schema() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::with_id(
            "email",
            "Email",
            FieldShape::Text {
                validation: TextValidation {
                    base: ValidationBase {
                        required: true,
                        error_messages: Some(ErrorMessages::One("Enter an email".into())),
                    },
                    min_length: Some(3),
                    max_length: None,
                    pattern: Some(Pattern::new(r"^\S+@\S+$").unwrap()),
                },
            },
        )
        .placeholder("you@example.com"),
        FieldDefinition::with_id(
            "age",
            "Age",
            FieldShape::Number {
                validation: NumberValidation {
                    base: ValidationBase::default(),
                    min: Some(0.0),
                    max: Some(120.5),
                },
            },
        )
        .default_value(0.0),
    ]
}

fn config(tmp: &TempDir) -> FormsConfig {
    FormsConfig {
        storage_dir: tmp.path().join("forms"),
        ..FormsConfig::default()
    }
}

#[test]
fn saved_schema_round_trips_through_disk() {
    let tmp = TempDir::new().unwrap();
    FormStorage::from_config(&config(&tmp)).save("signup", &schema());

    let reopened = FormStorage::from_config(&config(&tmp));
    assert_eq!(reopened.load("signup"), Some(schema()));
    assert!(tmp.path().join("forms/formBuilderData.json").is_file());
}

#[test]
fn delete_persists_across_reopen() {
    let tmp = TempDir::new().unwrap();
    let storage = FormStorage::from_config(&config(&tmp));
    storage.save("signup", &schema());
    storage.save("survey", &schema());
    storage.delete("signup");

    let names: Vec<_> = FormStorage::from_config(&config(&tmp))
        .load_all()
        .into_keys()
        .collect();
    assert_eq!(names, ["survey"]);
}

#[test]
fn corrupt_file_reads_as_empty() {
    let tmp = TempDir::new().unwrap();
    let cfg = config(&tmp);
    std::fs::create_dir_all(&cfg.storage_dir).unwrap();
    std::fs::write(cfg.storage_dir.join("formBuilderData.json"), "{ truncated").unwrap();

    let storage = FormStorage::from_config(&cfg);
    assert!(storage.load_all().is_empty());
    assert_eq!(storage.load("signup"), None);
}

#[test]
fn deleting_last_schema_removes_bucket_file() {
    let tmp = TempDir::new().unwrap();
    let storage = FormStorage::from_config(&config(&tmp));
    storage.save("signup", &schema());
    storage.delete("signup");

    assert!(!tmp.path().join("forms/formBuilderData.json").exists());
    assert!(storage.load_all().is_empty());
}
