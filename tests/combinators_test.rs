//! Integration tests for oneOf, anyOf, allOf and discriminators.

use serde_json::json;
use strictspec::{
    ConstraintKind, Error, Spec, Target, ValidationError, ValidationFailure, Validator, Value,
};

fn validator(schema: serde_json::Value, components: serde_json::Value) -> Validator {
    Validator::new(
        Spec::from_value(Value::from(json!({
            "openapi": "3.1.0",
            "paths": {
                "/shapes": {
                    "post": {
                        "requestBody": {"content": {"application/json": {"schema": schema}}},
                        "responses": {}
                    }
                }
            },
            "components": {"schemas": components}
        })))
        .unwrap(),
    )
}

fn errors(validator: &Validator, body: serde_json::Value) -> Vec<ValidationError> {
    match validator.validate_request(&body.to_string(), &Target::operation("/shapes", "post")) {
        Ok(()) => Vec::new(),
        Err(Error::Validation(failure)) => failure.into_errors().into_vec(),
        Err(other) => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_one_of_counts_clean_branches() {
    let v = validator(
        json!({"oneOf": [{"type": "integer"}, {"type": "number", "minimum": 10}]}),
        json!({}),
    );

    // Only the first branch matches.
    assert!(errors(&v, json!(3)).is_empty());
    // Only the second branch matches.
    assert!(errors(&v, json!(10.5)).is_empty());

    // Both branches match.
    let both = errors(&v, json!(12));
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].constraint, ConstraintKind::OneOf);
    assert!(both[0].reason.contains("matches multiple"));

    // Neither branch matches.
    let none = errors(&v, json!(2.5));
    assert_eq!(none.len(), 1);
    assert!(none[0].reason.contains("matches none"));
}

#[test]
fn test_any_of_needs_one_clean_branch() {
    let v = validator(
        json!({"anyOf": [{"type": "string", "maxLength": 2}, {"type": "string", "pattern": "^x"}]}),
        json!({}),
    );

    assert!(errors(&v, json!("ab")).is_empty());
    assert!(errors(&v, json!("xyz")).is_empty());

    let failed = errors(&v, json!("abc"));
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].constraint, ConstraintKind::AnyOf);
}

#[test]
fn test_all_of_reports_every_branch_error() {
    let v = validator(
        json!({
            "allOf": [
                {"$ref": "#/components/schemas/Named"},
                {"$ref": "#/components/schemas/Sized"}
            ]
        }),
        json!({
            "Named": {"type": "object", "required": ["name"], "properties": {"name": {"type": "string", "minLength": 1}}},
            "Sized": {"type": "object", "required": ["size"], "properties": {"size": {"type": "integer", "minimum": 1}}}
        }),
    );

    let found = errors(&v, json!({"name": "", "size": 0}));
    let kinds: Vec<_> = found.iter().map(|e| e.constraint).collect();
    assert_eq!(kinds, vec![ConstraintKind::MinLength, ConstraintKind::Minimum]);
    assert_eq!(
        found[0].spec_reference.as_str(),
        "#/components/schemas/Named/properties/name/minLength"
    );

    assert!(errors(&v, json!({"name": "a", "size": 1})).is_empty());
}

#[test]
fn test_composition_failure_classification() {
    let v = validator(json!({"oneOf": [{"type": "string"}, {"type": "boolean"}]}), json!({}));

    let err = v
        .validate_request("1", &Target::operation("/shapes", "post"))
        .unwrap_err();
    assert!(matches!(
        err.as_validation(),
        Some(ValidationFailure::Composition(_))
    ));
}

#[test]
fn test_discriminator_declines_for_missing_property() {
    let v = validator(
        json!({
            "oneOf": [{"$ref": "#/components/schemas/Circle"}, {"$ref": "#/components/schemas/Square"}],
            "discriminator": {"propertyName": "kind", "mapping": {"circle": "#/components/schemas/Circle"}}
        }),
        json!({
            "Circle": {"type": "object", "required": ["radius"], "properties": {"radius": {"type": "number"}}},
            "Square": {"type": "object", "required": ["side"], "properties": {"side": {"type": "number"}}}
        }),
    );

    // No discriminator property: brute force finds the single match.
    assert!(errors(&v, json!({"side": 2})).is_empty());

    // Mapped value: the selected schema decides, with no fallback.
    let selected = errors(&v, json!({"kind": "circle", "side": 2}));
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].constraint, ConstraintKind::Required);
    assert_eq!(selected[0].path.to_string(), "$.radius");
}

#[test]
fn test_discriminator_without_mapping_declines() {
    let v = validator(
        json!({
            "oneOf": [{"$ref": "#/components/schemas/A"}, {"$ref": "#/components/schemas/B"}],
            "discriminator": {"propertyName": "type"}
        }),
        json!({
            "A": {"type": "object", "required": ["a"]},
            "B": {"type": "object", "required": ["b"]}
        }),
    );

    assert!(errors(&v, json!({"type": "A", "a": 1})).is_empty());
    let none = errors(&v, json!({"type": "A"}));
    assert_eq!(none[0].constraint, ConstraintKind::OneOf);
}

#[test]
fn test_nested_composition_paths() {
    let v = validator(
        json!({
            "type": "object",
            "properties": {
                "shape": {"anyOf": [{"type": "string"}, {"type": "integer"}]}
            }
        }),
        json!({}),
    );

    let found = errors(&v, json!({"shape": 1.5}));
    assert_eq!(found[0].path.to_string(), "$.shape");
    assert_eq!(found[0].spec_reference.as_str(), "#/schema/properties/shape/anyOf");
}
