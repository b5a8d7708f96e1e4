//! Composition keywords: `oneOf`, `anyOf` and `allOf`.
//!
//! `oneOf` and `anyOf` try each branch against a fresh [`ErrorCollector`] and
//! only decide afterwards what reaches the caller's collector. A failing branch
//! therefore never leaks its own errors; the caller sees one composition error.
//! `allOf` has no such isolation. Every branch writes directly to the shared
//! collector, so a `minLength` failure inside `allOf` is reported as
//! `minLength`.

use tracing::debug;

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::{Map, Value};

use super::discriminator::{self, Dispatch};
use super::validate_at;

pub(crate) fn validate(
    value: &Value,
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    if let Some(branches) = schema.get("oneOf").and_then(Value::as_array) {
        validate_one_of(value, schema, branches, pointer, path, context, collector);
    }
    if let Some(branches) = schema.get("anyOf").and_then(Value::as_array) {
        validate_any_of(value, branches, pointer, path, context, collector);
    }
    if let Some(branches) = schema.get("allOf").and_then(Value::as_array) {
        let all_of = pointer.push("allOf");
        for (index, branch) in branches.iter().enumerate() {
            validate_at(value, branch, &all_of.push(index), path, context, collector);
        }
    }
}

fn validate_one_of(
    value: &Value,
    schema: &Map,
    branches: &[Value],
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    if let Some(discriminator) = schema.get("discriminator") {
        match discriminator::dispatch(
            value,
            discriminator,
            &pointer.push("discriminator"),
            path,
            context,
        ) {
            Dispatch::Matched => return,
            Dispatch::Failed(errors) => {
                collector.absorb(errors);
                return;
            }
            Dispatch::Declined(reason) => {
                debug!(%path, reason, "discriminator declined, trying every oneOf branch");
            }
        }
    }

    let one_of = pointer.push("oneOf");
    let attempts = attempt_all(value, branches, &one_of, path, context);
    let matched: Vec<usize> = attempts
        .iter()
        .enumerate()
        .filter(|(_, attempt)| attempt.is_empty())
        .map(|(index, _)| index)
        .collect();

    match matched.len() {
        1 => {}
        0 => collector.push(
            ValidationError::new(
                path.clone(),
                one_of,
                ConstraintKind::OneOf,
                format!(
                    "value matches none of the {} oneOf schemas",
                    branches.len()
                ),
            )
            .with_expected(format!("exactly one of {} schemas", branches.len()))
            .with_received("0 matching schemas")
            .with_optional_hint(closest_branch_hint(&attempts)),
        ),
        count => {
            let indices: Vec<String> = matched.iter().map(usize::to_string).collect();
            collector.push(
                ValidationError::new(
                    path.clone(),
                    one_of,
                    ConstraintKind::OneOf,
                    format!(
                        "value matches multiple oneOf schemas (branches {})",
                        indices.join(", ")
                    ),
                )
                .with_expected(format!("exactly one of {} schemas", branches.len()))
                .with_received(format!("{} matching schemas", count))
                .with_hint(
                    "add a discriminator or make the branches mutually exclusive so that only one applies",
                ),
            );
        }
    }
}

fn validate_any_of(
    value: &Value,
    branches: &[Value],
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    let any_of = pointer.push("anyOf");
    let mut attempts = Vec::with_capacity(branches.len());

    for (index, branch) in branches.iter().enumerate() {
        let mut attempt = ErrorCollector::new();
        validate_at(value, branch, &any_of.push(index), path, context, &mut attempt);
        if attempt.is_empty() {
            return;
        }
        attempts.push(attempt);
    }

    collector.push(
        ValidationError::new(
            path.clone(),
            any_of,
            ConstraintKind::AnyOf,
            format!(
                "value matches none of the {} anyOf schemas",
                branches.len()
            ),
        )
        .with_expected(format!("at least one of {} schemas", branches.len()))
        .with_received("0 matching schemas")
        .with_optional_hint(closest_branch_hint(&attempts)),
    );
}

fn attempt_all(
    value: &Value,
    branches: &[Value],
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
) -> Vec<ErrorCollector> {
    branches
        .iter()
        .enumerate()
        .map(|(index, branch)| {
            let mut attempt = ErrorCollector::new();
            validate_at(value, branch, &pointer.push(index), path, context, &mut attempt);
            attempt
        })
        .collect()
}

/// Describes the failed branch with the fewest violations.
fn closest_branch_hint(attempts: &[ErrorCollector]) -> Option<String> {
    let (index, attempt) = attempts
        .iter()
        .enumerate()
        .filter(|(_, attempt)| !attempt.is_empty())
        .min_by_key(|(_, attempt)| attempt.len())?;
    let first = attempt.errors().first()?;
    Some(format!(
        "closest match is branch {} ({} error(s)), first: {} at {}",
        index,
        attempt.len(),
        first.reason,
        first.path
    ))
}
