//! Integration tests for ValidationError, ValidationErrors and classification.

use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;
use strictspec::{
    validate_request, ConstraintKind, ErrorCategory, ErrorCollector, JsonPath, SchemaPointer,
    Spec, ValidationError, ValidationErrors, ValidationFailure, ValidationResult, Value,
};

fn error(field: &str, constraint: ConstraintKind, reason: &str) -> ValidationError {
    ValidationError::new(
        JsonPath::root().push_field(field),
        SchemaPointer::root()
            .push("properties")
            .push(field)
            .push(constraint.as_str()),
        constraint,
        reason,
    )
}

#[test]
fn test_error_full_context() {
    let error = error("email", ConstraintKind::Format, "\"x\" is not a valid email")
        .with_expected("email")
        .with_received("x")
        .with_hint("expected an email address such as user@example.com");

    assert_eq!(error.path.to_string(), "$.email");
    assert_eq!(
        error.spec_reference.as_str(),
        "#/schema/properties/email/format"
    );
    assert_eq!(error.expected, Some(Value::from("email")));
    assert_eq!(error.received, Some(Value::from("x")));
    assert_eq!(error.constraint.category(), ErrorCategory::Format);
}

#[test]
fn test_report_format() {
    let errors = ValidationErrors::single(
        error("age", ConstraintKind::Type, "expected integer, received string")
            .with_expected("integer")
            .with_received("string")
            .with_hint("send 35 as a JSON number"),
    )
    .combine(ValidationErrors::single(
        error("tags", ConstraintKind::MinItems, "array has 0 items, fewer than the minimum of 1")
            .with_expected(1usize)
            .with_received(0usize),
    ));

    let expected = "Validation failed with 2 error(s):\n\
        \n\
        [1] expected integer, received string at $.age, breaking #/schema/properties/age/type expectations\n    \
        expected: \"integer\"\n    \
        received: \"string\"\n    \
        hint: send 35 as a JSON number\n\
        \n\
        [2] array has 0 items, fewer than the minimum of 1 at $.tags, breaking #/schema/properties/tags/minItems expectations\n    \
        expected: 1\n    \
        received: 0\n";

    assert_eq!(errors.to_string(), expected);
}

#[test]
fn test_received_omitted_when_equal_to_expected() {
    let rendered = error("n", ConstraintKind::Enum, "1.0 is not one of the allowed values")
        .with_expected(json!(1.0))
        .with_received(json!(1.0))
        .to_string();

    assert!(rendered.contains("expected: 1.0"));
    assert!(!rendered.contains("received:"));
}

#[test]
fn test_values_rendered_as_json() {
    let rendered = error("v", ConstraintKind::Enum, "not allowed")
        .with_expected(Value::from(json!(["a", null, true, {"k": [1]}])))
        .with_received(Value::Null)
        .to_string();

    assert!(rendered.contains(r#"expected: ["a",null,true,{"k":[1]}]"#));
    assert!(rendered.contains("received: null"));
}

#[test]
fn test_errors_combine_via_semigroup() {
    let combined = ValidationErrors::single(error("a", ConstraintKind::Required, "missing a"))
        .combine(ValidationErrors::single(error("b", ConstraintKind::Required, "missing b")));

    assert_eq!(combined.len(), 2);
    assert!(!combined.is_empty());
    assert_eq!(combined.first().reason, "missing a");
    assert_eq!(combined.common_category(), Some(ErrorCategory::Required));
}

#[test]
fn test_errors_filtering() {
    let errors = ValidationErrors::from_vec(vec![
        error("a", ConstraintKind::Minimum, "too small"),
        error("b", ConstraintKind::MaxLength, "too long"),
        error("a", ConstraintKind::Pattern, "no match"),
    ])
    .unwrap();

    assert_eq!(errors.at_path(&JsonPath::root().push_field("a")).len(), 2);
    assert_eq!(errors.with_constraint(ConstraintKind::MaxLength).len(), 1);
    assert_eq!(errors.in_category(ErrorCategory::Boundary).len(), 2);
    assert_eq!(errors.common_category(), None);
    assert!(ValidationErrors::from_vec(Vec::new()).is_none());
}

#[test]
fn test_validation_result_accumulates() {
    let mut collector = ErrorCollector::new();
    collector.push(error("a", ConstraintKind::Type, "wrong type"));
    collector.push(error("b", ConstraintKind::Type, "wrong type"));

    let result: ValidationResult<()> = collector.into_validation();
    match result {
        Validation::Failure(errors) => assert_eq!(errors.len(), 2),
        Validation::Success(_) => panic!("expected failure"),
    }
}

#[test]
fn test_classification_by_category() {
    let single = |constraint| {
        ValidationFailure::classify(ValidationErrors::single(error("x", constraint, "bad")))
    };

    assert!(matches!(single(ConstraintKind::Type), ValidationFailure::Type(_)));
    assert!(matches!(single(ConstraintKind::Required), ValidationFailure::Required(_)));
    assert!(matches!(
        single(ConstraintKind::AdditionalProperties),
        ValidationFailure::AdditionalProperties(_)
    ));
    assert!(matches!(single(ConstraintKind::Format), ValidationFailure::Format(_)));
    assert!(matches!(single(ConstraintKind::UniqueItems), ValidationFailure::Boundary(_)));
    assert!(matches!(single(ConstraintKind::Enum), ValidationFailure::Enum(_)));
    assert!(matches!(single(ConstraintKind::Pattern), ValidationFailure::Pattern(_)));
    assert!(matches!(single(ConstraintKind::AllOf), ValidationFailure::Composition(_)));
    assert!(matches!(
        single(ConstraintKind::Discriminator),
        ValidationFailure::Discriminator(_)
    ));
    assert!(matches!(
        single(ConstraintKind::Reference),
        ValidationFailure::SchemaViolation(_)
    ));
}

#[test]
fn test_boundary_family_stays_specific() {
    let errors = ValidationErrors::from_vec(vec![
        error("a", ConstraintKind::Minimum, "too small"),
        error("b", ConstraintKind::MaxItems, "too many"),
    ])
    .unwrap();

    let failure = ValidationFailure::classify(errors);
    assert!(matches!(failure, ValidationFailure::Boundary(_)));
    assert_eq!(failure.errors().len(), 2);
}

#[test]
fn test_exhaustive_collection_end_to_end() {
    let spec = Spec::from_value(Value::from(json!({
        "paths": {
            "/signup": {
                "post": {
                    "requestBody": {"content": {"application/json": {"schema": {
                        "type": "object",
                        "required": ["email", "password", "age"],
                        "properties": {
                            "email": {"type": "string", "format": "email"},
                            "password": {"type": "string", "minLength": 8},
                            "age": {"type": "integer", "minimum": 13},
                            "plan": {"enum": ["free", "pro"]},
                            "referrer": {"type": "string", "pattern": "^[A-Z0-9]{6}$"}
                        }
                    }}}},
                    "responses": {}
                }
            }
        }
    })))
    .unwrap();

    let body = r#"{
        "email": "nope",
        "password": "short",
        "age": 12,
        "plan": "Pro",
        "referrer": "abc"
    }"#;
    let err = validate_request(body, &spec, Some("/signup"), Some("post")).unwrap_err();
    let failure = err.as_validation().unwrap();

    let kinds: Vec<_> = failure.errors().iter().map(|e| e.constraint).collect();
    assert_eq!(
        kinds,
        vec![
            ConstraintKind::Format,
            ConstraintKind::MinLength,
            ConstraintKind::Minimum,
            ConstraintKind::Enum,
            ConstraintKind::Pattern,
        ]
    );
    assert!(matches!(failure, ValidationFailure::SchemaViolation(_)));
    assert!(err.to_string().starts_with("Validation failed with 5 error(s):"));
}
