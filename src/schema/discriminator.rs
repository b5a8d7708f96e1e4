//! Discriminator dispatch for `oneOf`.
//!
//! A discriminator names a property whose string value selects one branch
//! through `mapping`. When that selection cannot be made, dispatch declines
//! and the caller falls back to trying every branch.

use tracing::trace;

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::Value;

use super::ref_schema;

const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// The outcome of discriminator dispatch.
#[derive(Debug)]
pub(crate) enum Dispatch {
    /// The mapped schema accepted the value.
    Matched,
    /// A branch was selected and these are its violations.
    Failed(ErrorCollector),
    /// No branch could be selected.
    Declined(&'static str),
}

pub(crate) fn dispatch(
    value: &Value,
    discriminator: &Value,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
) -> Dispatch {
    let Some(property) = discriminator.get("propertyName").and_then(Value::as_str) else {
        return Dispatch::Declined("discriminator has no propertyName");
    };
    let Some(object) = value.as_object() else {
        return Dispatch::Declined("value is not an object");
    };
    let Some(tag) = object.get(property) else {
        return Dispatch::Declined("discriminator property is missing");
    };
    let Some(tag) = tag.as_str() else {
        return Dispatch::Declined("discriminator property is not a string");
    };
    let Some(mapping) = discriminator.get("mapping").and_then(Value::as_object) else {
        return Dispatch::Declined("discriminator has no mapping");
    };
    let Some(target) = mapping.get(tag) else {
        return Dispatch::Declined("discriminator value is not mapped");
    };

    let mut attempt = ErrorCollector::new();
    let mapping_pointer = pointer.push("mapping").push(tag);

    // Mapping values may be full references or bare component names.
    let reference = match target.as_str() {
        Some(name) if name.starts_with('#') => name.to_string(),
        Some(name) => format!("{}{}", COMPONENT_SCHEMA_PREFIX, name),
        None => {
            attempt.push(
                ValidationError::new(
                    path.push_field(property),
                    mapping_pointer,
                    ConstraintKind::Discriminator,
                    format!("mapping for \"{}\" is not a schema reference", tag),
                )
                .with_received(tag),
            );
            return Dispatch::Failed(attempt);
        }
    };

    if context.spec().resolve_ref(&reference).is_none() {
        attempt.push(
            ValidationError::new(
                path.push_field(property),
                mapping_pointer,
                ConstraintKind::Discriminator,
                format!(
                    "mapping for \"{}\" points to {}, which cannot be resolved",
                    tag, reference
                ),
            )
            .with_expected(reference)
            .with_received(tag),
        );
        return Dispatch::Failed(attempt);
    }

    trace!(%path, tag, reference = reference.as_str(), "discriminator selected schema");
    ref_schema::follow(&reference, value, pointer, path, context, &mut attempt);

    if attempt.is_empty() {
        Dispatch::Matched
    } else {
        Dispatch::Failed(attempt)
    }
}
