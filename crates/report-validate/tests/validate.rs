//! Submission validation against synthesized schemas.

use report_model::{FieldType, FieldValidation, FormFieldDescriptor, Submission};
use report_validate::{
    SchemaOptions, SubmitterEmail, Violation, build_schema, build_schema_with, check, validate,
};
use serde_json::{Value, json};

fn submission(data: Value) -> Submission {
    serde_json::from_value(json!({ "data": data })).expect("submission")
}

fn field(id: &str, field_type: FieldType, label: &str, required: bool) -> FormFieldDescriptor {
    FormFieldDescriptor::new(id, field_type, label).required(required)
}

fn age_field() -> FormFieldDescriptor {
    field("age", FieldType::Number, "Age", true).with_validation(FieldValidation {
        min: Some(18.0),
        max: Some(99.0),
        ..FieldValidation::default()
    })
}

#[test]
fn invalid_email_is_reported_on_data_path() {
    let schema = build_schema(&[field("email", FieldType::Email, "Email", true)]).unwrap();
    let result = validate(&schema, &submission(json!({"email": "not-an-email"})));
    assert!(!result.is_valid);
    insta::assert_snapshot!(
        result.error("data.email").unwrap(),
        @"Please enter a valid email address"
    );
}

#[test]
fn valid_email_passes() {
    let schema = build_schema(&[field("email", FieldType::Email, "Email", true)]).unwrap();
    let result = validate(&schema, &submission(json!({"email": "a@b.com"})));
    assert!(result.is_valid);
    assert!(result.errors.is_none());
}

#[test]
fn number_below_minimum_references_bound() {
    let schema = build_schema(&[age_field()]).unwrap();
    let result = validate(&schema, &submission(json!({"age": 15})));
    assert!(!result.is_valid);
    insta::assert_snapshot!(result.error("data.age").unwrap(), @"Age must be at least 18");
}

#[test]
fn number_bounds_are_inclusive_and_strings_coerce() {
    let schema = build_schema(&[age_field()]).unwrap();
    assert!(validate(&schema, &submission(json!({"age": 18}))).is_valid);
    assert!(validate(&schema, &submission(json!({"age": "99"}))).is_valid);
    let result = validate(&schema, &submission(json!({"age": "100"})));
    assert_eq!(result.error("data.age"), Some("Age must be at most 99"));
    let result = validate(&schema, &submission(json!({"age": "twelve"})));
    assert_eq!(result.error("data.age"), Some("Age must be a number"));
}

#[test]
fn required_checkbox_must_be_checked() {
    let schema = build_schema(&[field("vip", FieldType::Checkbox, "VIP", true)]).unwrap();

    let result = validate(&schema, &submission(json!({"vip": false})));
    assert!(!result.is_valid);
    assert_eq!(result.error("data.vip"), Some("VIP is required"));

    assert!(validate(&schema, &submission(json!({"vip": true}))).is_valid);

    let result = validate(&schema, &submission(json!({"vip": "yes"})));
    assert_eq!(result.error("data.vip"), Some("VIP must be true or false"));
}

#[test]
fn optional_checkbox_accepts_false_and_absence() {
    let schema = build_schema(&[field("news", FieldType::Checkbox, "News", false)]).unwrap();
    assert!(validate(&schema, &submission(json!({"news": false}))).is_valid);
    assert!(validate(&schema, &submission(json!({}))).is_valid);
}

#[test]
fn every_required_field_reports_on_empty_submission() {
    let fields = vec![
        field("name", FieldType::Text, "Name", true),
        field("email", FieldType::Email, "Email", true),
        age_field(),
        field("vip", FieldType::Checkbox, "VIP", true),
        field("plan", FieldType::Select, "Plan", true).with_options([("basic", "Basic")]),
    ];
    let schema = build_schema(&fields).unwrap();
    let result = validate(&schema, &Submission::default());

    assert!(!result.is_valid);
    let errors = result.errors.as_ref().unwrap();
    assert_eq!(errors.len(), fields.len());
    for (_, message) in errors.iter() {
        assert!(message.ends_with("is required"), "{message}");
    }
}

#[test]
fn optional_fields_accept_empty_submission() {
    let fields = vec![
        field("name", FieldType::Text, "Name", false),
        field("email", FieldType::Email, "Email", false),
        field("site", FieldType::Url, "Site", false),
        field("born", FieldType::Date, "Born", false),
    ];
    let schema = build_schema(&fields).unwrap();
    assert!(validate(&schema, &Submission::default()).is_valid);
    assert!(validate(&schema, &submission(json!({"email": "", "site": null}))).is_valid);
}

#[test]
fn optional_but_present_values_keep_shape_checks() {
    let fields = vec![
        field("email", FieldType::Email, "Email", false),
        field("phone", FieldType::Tel, "Phone", false),
        field("site", FieldType::Url, "Site", false),
        field("born", FieldType::Date, "Born", false),
    ];
    let schema = build_schema(&fields).unwrap();
    let result = validate(
        &schema,
        &submission(json!({
            "email": "nope",
            "phone": "call me",
            "site": "example",
            "born": "01/02/2000"
        })),
    );
    assert_eq!(result.error_count(), 4);
    assert_eq!(result.error("data.phone"), Some("Please enter a valid phone number"));
    assert_eq!(result.error("data.site"), Some("Please enter a valid URL"));
    assert_eq!(
        result.error("data.born"),
        Some("Please enter a valid date (YYYY-MM-DD)")
    );
}

#[test]
fn choice_fields_use_closed_option_sets() {
    let fields = vec![
        field("plan", FieldType::Select, "Plan", true).with_options([("basic", "Basic"), ("pro", "Pro")]),
        field("size", FieldType::Radio, "Size", false),
    ];
    let schema = build_schema(&fields).unwrap();

    assert!(validate(&schema, &submission(json!({"plan": "pro", "size": "anything"}))).is_valid);

    let violations = check(&schema, &submission(json!({"plan": "Pro"})));
    assert_eq!(
        violations,
        vec![Violation::InvalidOption {
            path: "data.plan".to_string(),
            label: "Plan".to_string(),
            value: "Pro".to_string(),
        }]
    );
}

#[test]
fn text_constraints_apply_in_order() {
    let code = field("code", FieldType::Text, "Code", true).with_validation(FieldValidation {
        min_length: Some(3),
        max_length: Some(5),
        pattern: Some("^[A-Z]+$".to_string()),
        ..FieldValidation::default()
    });
    let schema = build_schema(&[code]).unwrap();

    let message = |value: Value| {
        validate(&schema, &submission(json!({ "code": value })))
            .error("data.code")
            .map(str::to_string)
    };
    assert_eq!(message(json!("AB")), Some("Code must be at least 3 characters".to_string()));
    assert_eq!(message(json!("ABCDEF")), Some("Code must be at most 5 characters".to_string()));
    assert_eq!(message(json!("abc")), Some("Code has an invalid format".to_string()));
    assert_eq!(message(json!(123)), Some("Code must be text".to_string()));
    assert_eq!(message(json!("ABCD")), None);
}

#[test]
fn check_lists_length_and_pattern_violations_together() {
    let code = field("code", FieldType::Text, "Code", true).with_validation(FieldValidation {
        min_length: Some(3),
        pattern: Some("^[A-Z]+$".to_string()),
        ..FieldValidation::default()
    });
    let schema = build_schema(&[code]).unwrap();
    let input = submission(json!({"code": "ab"}));

    let codes: Vec<&str> = check(&schema, &input).iter().map(Violation::code).collect();
    assert_eq!(codes, vec!["too_short", "pattern_mismatch"]);
    assert_eq!(
        validate(&schema, &input).error("data.code"),
        Some("Code must be at least 3 characters")
    );
}

#[test]
fn length_counts_characters_not_bytes() {
    let name = field("name", FieldType::Textarea, "Name", true).with_validation(FieldValidation {
        max_length: Some(3),
        ..FieldValidation::default()
    });
    let schema = build_schema(&[name]).unwrap();
    assert!(validate(&schema, &submission(json!({"name": "äöü"}))).is_valid);
}

#[test]
fn unknown_types_validate_as_text() {
    let schema =
        build_schema(&[field("tint", FieldType::Other("color".to_string()), "Tint", true)]).unwrap();
    assert!(validate(&schema, &submission(json!({"tint": "#ff0000"}))).is_valid);
    assert_eq!(
        validate(&schema, &submission(json!({"tint": 1}))).error("data.tint"),
        Some("Tint must be text")
    );
}

#[test]
fn submitter_email_is_checked() {
    let schema = build_schema(&[]).unwrap();
    let bad = Submission::default().with_submitter_email("nope");
    assert_eq!(
        validate(&schema, &bad).error("submitterEmail"),
        Some("Please enter a valid email address")
    );

    let required = build_schema_with(
        &[],
        SchemaOptions {
            submitter_email: SubmitterEmail::Required,
        },
    )
    .unwrap();
    assert_eq!(
        validate(&required, &Submission::default()).error("submitterEmail"),
        Some("Email is required")
    );
    let good = Submission::default().with_submitter_email("a@b.com");
    assert!(validate(&required, &good).is_valid);
}

#[test]
fn validation_does_not_stop_at_first_field() {
    let fields = vec![
        field("email", FieldType::Email, "Email", true),
        age_field(),
        field("name", FieldType::Text, "Name", true),
    ];
    let schema = build_schema(&fields).unwrap();
    let result = validate(
        &schema,
        &submission(json!({"email": "x", "age": 5, "name": "Ada"})),
    );
    assert_eq!(result.error_count(), 2);
    assert!(result.error("data.email").is_some());
    assert!(result.error("data.age").is_some());
    assert!(result.error("data.name").is_none());
}

#[test]
fn date_and_phone_accept_ascii_digits_only() {
    let fields = vec![
        field("start", FieldType::Date, "Start", true),
        field("phone", FieldType::Tel, "Phone", true),
    ];
    let schema = build_schema(&fields).unwrap();

    let arabic_indic = submission(json!({
        "start": "\u{0662}\u{0660}\u{0662}\u{0664}-\u{0660}\u{0661}-\u{0661}\u{0665}",
        "phone": "\u{0660}\u{0661}\u{0662}\u{0663}\u{2003}\u{0664}\u{0665}\u{0666}",
    }));
    let result = validate(&schema, &arabic_indic);
    assert!(!result.is_valid);
    assert_eq!(
        result.error("data.start"),
        Some("Please enter a valid date (YYYY-MM-DD)")
    );
    assert_eq!(result.error("data.phone"), Some("Please enter a valid phone number"));

    let ascii = submission(json!({"start": "2024-01-15", "phone": "+1 (555) 123-4567"}));
    assert!(validate(&schema, &ascii).is_valid);
}

#[test]
fn result_json_matches_client_shape() {
    let schema = build_schema(&[field("email", FieldType::Email, "Email", true)]).unwrap();
    let result = validate(&schema, &submission(json!({})));
    insta::assert_json_snapshot!(result, @r#"
    {
      "isValid": false,
      "errors": {
        "data.email": "Email is required"
      }
    }
    "#);
}
