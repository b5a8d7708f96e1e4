//! `$ref` following.
//!
//! References are resolved against the spec's `components.schemas`. Errors
//! found inside the target carry pointers rooted at the reference itself
//! (`#/components/schemas/Pet/properties/name/type`), so a report always names
//! the schema that was actually broken.

use tracing::debug;

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::Value;

use super::validate_at;

/// Validates `value` against the schema `reference` points to.
///
/// `site` is the pointer of the schema node holding the `$ref`. An unresolved
/// reference or a chain deeper than the configured limit records a `$ref`
/// violation at the site and validation of this branch stops.
pub(crate) fn follow(
    reference: &str,
    value: &Value,
    site: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    if context.depth_exceeded() {
        debug!(reference, depth = context.depth(), "maximum $ref depth reached");
        collector.push(
            ValidationError::new(
                path.clone(),
                site.push("$ref"),
                ConstraintKind::Reference,
                format!(
                    "maximum reference depth of {} exceeded while following {}",
                    context.options().max_ref_depth(),
                    reference
                ),
            )
            .with_expected(reference),
        );
        return;
    }

    match context.spec().resolve_ref(reference) {
        Some(target) => validate_at(
            value,
            target,
            &SchemaPointer::new(reference),
            path,
            &context.increment_depth(),
            collector,
        ),
        None => {
            debug!(reference, "unresolved $ref");
            collector.push(
                ValidationError::new(
                    path.clone(),
                    site.push("$ref"),
                    ConstraintKind::Reference,
                    format!("reference {} cannot be resolved", reference),
                )
                .with_expected(reference)
                .with_hint("only local references of the form #/components/schemas/<Name> are supported"),
            );
        }
    }
}
