//! Object keywords: `required`, `additionalProperties` and `properties`.
//!
//! `required` is about presence only. A property that is present with a
//! `null` value satisfies `required`, and whether `null` is acceptable is
//! left to the property's own `type`.

use heck::{ToLowerCamelCase, ToSnakeCase};

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::{Map, Value};

use super::validate_at;

pub(crate) fn validate(
    object: &Map,
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    let properties = schema.get("properties").and_then(Value::as_object);
    let declared: Vec<&str> = properties
        .map(|props| props.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let distance = context.options().suggestion_distance();

    let undeclared: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !declared.contains(key))
        .collect();

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if object.contains_key(name) {
                continue;
            }
            let hint = closest(name, &undeclared, distance).map(|found| {
                format!(
                    "found unexpected property \"{}\"; was it meant to be \"{}\"?",
                    found, name
                )
            });
            collector.push(
                ValidationError::new(
                    path.push_field(name),
                    pointer.push("required"),
                    ConstraintKind::Required,
                    format!("missing required property \"{}\"", name),
                )
                .with_expected(name)
                .with_optional_hint(hint),
            );
        }
    }

    let additional = schema.get("additionalProperties");
    if additional == Some(&Value::Bool(false)) {
        for key in &undeclared {
            collector.push(
                ValidationError::new(
                    path.push_field(*key),
                    pointer.push("additionalProperties"),
                    ConstraintKind::AdditionalProperties,
                    format!("unexpected property \"{}\"", key),
                )
                .with_expected(Value::Array(
                    declared.iter().map(|name| Value::from(*name)).collect(),
                ))
                .with_received(*key)
                .with_optional_hint(suggest_property(key, &declared, distance)),
            );
        }
    }
    let additional_schema = additional.filter(|schema| schema.as_object().is_some());
    let child = context.descend();

    for (key, value) in object {
        let property_path = path.push_field(key.as_str());
        match properties.and_then(|props| props.get(key)) {
            Some(property_schema) => validate_at(
                value,
                property_schema,
                &pointer.push("properties").push(key),
                &property_path,
                &child,
                collector,
            ),
            None => {
                if let Some(additional_schema) = additional_schema {
                    validate_at(
                        value,
                        additional_schema,
                        &pointer.push("additionalProperties"),
                        &property_path,
                        &child,
                        collector,
                    );
                }
            }
        }
    }
}

/// Suggests a declared property for an unexpected key.
///
/// Naming-convention mismatches (`user_name` for `userName`) are checked
/// first, then plain typos within `distance` edits.
///
/// # Example
///
/// ```rust
/// use strictspec::schema::suggest_property;
///
/// let declared = ["userName", "email"];
/// assert_eq!(
///     suggest_property("user_name", &declared, 2).as_deref(),
///     Some("did you mean \"userName\"? properties use camelCase")
/// );
/// assert_eq!(
///     suggest_property("emial", &declared, 2).as_deref(),
///     Some("did you mean \"email\"?")
/// );
/// assert_eq!(suggest_property("zzz", &declared, 2), None);
/// ```
pub fn suggest_property(unknown: &str, declared: &[&str], distance: usize) -> Option<String> {
    let camel = unknown.to_lower_camel_case();
    if camel != unknown && declared.contains(&camel.as_str()) {
        return Some(format!(
            "did you mean \"{}\"? properties use camelCase",
            camel
        ));
    }

    let snake = unknown.to_snake_case();
    if snake != unknown && declared.contains(&snake.as_str()) {
        return Some(format!(
            "did you mean \"{}\"? properties use snake_case",
            snake
        ));
    }

    closest(unknown, declared, distance).map(|name| format!("did you mean \"{}\"?", name))
}

/// Returns the candidate closest to `target` within `distance` edits.
///
/// A candidate must also be closer than the target's own length, so that
/// very short keys do not match everything.
fn closest<'a>(target: &str, candidates: &[&'a str], distance: usize) -> Option<&'a str> {
    let target_lower = target.to_lowercase();
    let target_len = target.chars().count();

    candidates
        .iter()
        .filter_map(|candidate| {
            let d = levenshtein(&target_lower, &candidate.to_lowercase());
            (d <= distance && d < target_len.max(1)).then_some((*candidate, d))
        })
        .min_by_key(|(_, d)| *d)
        .map(|(candidate, _)| candidate)
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let mut prev_row: Vec<usize> = (0..=b_len).collect();
    let mut curr_row = vec![0; b_len + 1];

    for (i, a_char) in a.chars().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b.chars().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_len]
}
