//! The `enum` keyword.
//!
//! Membership uses strict equality: `"Active"` does not match `"active"` and
//! `1.0` does not match `1`. Near misses get a hint instead of a pass.

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::value::{Map, Value};

pub(crate) fn validate(
    value: &Value,
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    collector: &mut ErrorCollector,
) {
    let Some(allowed) = schema.get("enum").and_then(Value::as_array) else {
        return;
    };
    if allowed.contains(value) {
        return;
    }

    collector.push(
        ValidationError::new(
            path.clone(),
            pointer.push("enum"),
            ConstraintKind::Enum,
            format!("{} is not one of the allowed values", value),
        )
        .with_expected(Value::Array(allowed.clone()))
        .with_received(value.clone())
        .with_optional_hint(near_miss(value, allowed)),
    );
}

fn near_miss(value: &Value, allowed: &[Value]) -> Option<String> {
    match value {
        Value::String(s) => {
            if s.is_empty() && allowed.contains(&Value::Null) {
                return Some("use null instead of an empty string".to_string());
            }
            let lowered = s.to_lowercase();
            allowed
                .iter()
                .filter_map(Value::as_str)
                .find(|candidate| candidate.to_lowercase() == lowered)
                .map(|candidate| {
                    format!(
                        "did you mean \"{}\"? enum values are case-sensitive",
                        candidate
                    )
                })
        }
        Value::Number(n) => allowed
            .iter()
            .filter_map(Value::as_number)
            .find(|candidate| candidate.same_value(n))
            .map(|candidate| {
                format!(
                    "{} has the same value as the allowed {} but is written differently",
                    n, candidate
                )
            }),
        Value::Null if allowed.contains(&Value::String(String::new())) => {
            Some("use an empty string instead of null".to_string())
        }
        _ => None,
    }
}
