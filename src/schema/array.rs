//! Array keywords: `minItems`, `maxItems`, `uniqueItems` and `items`.

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::{Map, Value};

use super::validate_at;

pub(crate) fn validate(
    items: &[Value],
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    let count = items.len();

    if let Some(min) = schema.get("minItems").and_then(Value::as_usize) {
        if count < min {
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer.push("minItems"),
                    ConstraintKind::MinItems,
                    format!("array has {} items, fewer than the minimum of {}", count, min),
                )
                .with_expected(min)
                .with_received(count),
            );
        }
    }

    if let Some(max) = schema.get("maxItems").and_then(Value::as_usize) {
        if count > max {
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer.push("maxItems"),
                    ConstraintKind::MaxItems,
                    format!("array has {} items, more than the maximum of {}", count, max),
                )
                .with_expected(max)
                .with_received(count),
            );
        }
    }

    if schema.get("uniqueItems").and_then(Value::as_bool) == Some(true) {
        for group in duplicate_groups(items) {
            let indices: Vec<String> = group.iter().map(usize::to_string).collect();
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer.push("uniqueItems"),
                    ConstraintKind::UniqueItems,
                    format!(
                        "array items at indices {} are equal",
                        indices.join(", ")
                    ),
                )
                .with_expected("unique items")
                .with_received(items[group[0]].clone()),
            );
        }
    }

    if let Some(item_schema) = schema.get("items").filter(|s| s.as_object().is_some()) {
        let item_pointer = pointer.push("items");
        let child = context.descend();
        for (index, item) in items.iter().enumerate() {
            validate_at(
                item,
                item_schema,
                &item_pointer,
                &path.push_index(index),
                &child,
                collector,
            );
        }
    }
}

/// Groups the indices of equal items, in order of first occurrence.
///
/// Only groups with more than one member are returned. Equality follows JSON
/// Schema: `1` and `1.0` are duplicates, and object key order is ignored.
fn duplicate_groups(items: &[Value]) -> Vec<Vec<usize>> {
    let mut claimed = vec![false; items.len()];
    let mut groups = Vec::new();

    for i in 0..items.len() {
        if claimed[i] {
            continue;
        }
        let mut group = vec![i];
        for j in (i + 1)..items.len() {
            if !claimed[j] && items[i].json_eq(&items[j]) {
                claimed[j] = true;
                group.push(j);
            }
        }
        if group.len() > 1 {
            groups.push(group);
        }
    }
    groups
}
