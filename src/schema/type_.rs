//! The `type` keyword.
//!
//! Type checking is strict: a numeric string is not a number, `1.0` is not an
//! integer, `"true"` is not a boolean and `null` is only accepted when the
//! schema allows it, either with `"null"` in a type list or with the OpenAPI
//! 3.0 `nullable: true` flag.

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::value::{Map, Number, Value};

/// Returns true if `value` satisfies the schema's `type` declaration.
///
/// A schema without a `type` keyword accepts every value.
///
/// # Example
///
/// ```rust
/// use strictspec::schema::type_;
/// use strictspec::Value;
/// use serde_json::json;
///
/// let schema = Value::from(json!({"type": ["integer", "null"]}));
/// let schema = schema.as_object().unwrap();
///
/// assert!(type_::check(&Value::from(json!(7)), schema));
/// assert!(type_::check(&Value::Null, schema));
/// assert!(!type_::check(&Value::from(json!(7.0)), schema));
/// assert!(!type_::check(&Value::from("7"), schema));
/// ```
pub fn check(value: &Value, schema: &Map) -> bool {
    match declared_types(schema) {
        Some(types) => types.iter().any(|name| matches_type(value, name)),
        None => true,
    }
}

/// Returns true if `value` is an instance of the named JSON Schema type.
pub fn matches_type(value: &Value, name: &str) -> bool {
    match (name, value) {
        ("null", Value::Null) => true,
        ("boolean", Value::Bool(_)) => true,
        ("string", Value::String(_)) => true,
        ("number", Value::Number(_)) => true,
        ("integer", Value::Number(Number::Integer(_))) => true,
        ("array", Value::Array(_)) => true,
        ("object", Value::Object(_)) => true,
        _ => false,
    }
}

/// Checks `type` and records a violation. Returns false if the value has the
/// wrong type.
pub(crate) fn validate(
    value: &Value,
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    collector: &mut ErrorCollector,
) -> bool {
    let Some(types) = declared_types(schema) else {
        return true;
    };
    if types.iter().any(|name| matches_type(value, name)) {
        return true;
    }

    let expected = types.join(", ");
    let error = ValidationError::new(
        path.clone(),
        pointer.push("type"),
        ConstraintKind::Type,
        format!("expected {}, received {}", expected, value.type_name()),
    )
    .with_expected(expected)
    .with_received(value.type_name())
    .with_optional_hint(type_hint(value, &types));

    collector.push(error);
    false
}

fn declared_types(schema: &Map) -> Option<Vec<&str>> {
    let mut types: Vec<&str> = match schema.get("type")? {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
        _ => return None,
    };
    if schema.get("nullable").and_then(Value::as_bool) == Some(true) && !types.contains(&"null") {
        types.push("null");
    }
    Some(types)
}

fn type_hint(value: &Value, types: &[&str]) -> Option<String> {
    let allows = |name: &str| types.contains(&name);

    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if allows("integer") && trimmed.parse::<i128>().is_ok() {
                return Some(format!(
                    "\"{}\" is a numeric string; send {} as a JSON number without quotes",
                    s, trimmed
                ));
            }
            if allows("number") && !trimmed.is_empty() && trimmed.parse::<f64>().is_ok() {
                return Some(format!(
                    "\"{}\" is a numeric string; send {} as a JSON number without quotes",
                    s, trimmed
                ));
            }
            if allows("boolean") && (trimmed == "true" || trimmed == "false") {
                return Some(format!(
                    "send the boolean {} without quotes",
                    trimmed
                ));
            }
            None
        }
        Value::Number(n @ Number::Float(_)) if allows("integer") => n.integral_value().map(|i| {
            format!(
                "{} is written with a fractional part; send {} for an integer",
                n, i
            )
        }),
        Value::Number(n) if allows("string") => {
            Some(format!("send \"{}\" in quotes if a string is intended", n))
        }
        Value::Bool(b) if allows("string") => {
            Some(format!("send \"{}\" in quotes if a string is intended", b))
        }
        Value::Null => Some(
            "this field is not nullable; omit it or send a value of the expected type".to_string(),
        ),
        _ => None,
    }
}
