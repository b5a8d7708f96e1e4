//! Schema validation.
//!
//! This module walks a schema (an object of JSON Schema keywords taken from
//! the OpenAPI document) alongside the value it governs. Every keyword check
//! appends its violations to the call's [`ErrorCollector`] and returns normally,
//! so a single pass reports everything that is wrong.
//!
//! The descent for one schema node runs in this order:
//!
//! 1. `$ref` is followed. Keywords written next to it (OpenAPI 3.1 allows
//!    `{"$ref": "...", "maxLength": 5}`) are then applied to the same value.
//! 2. `type` is checked. A value of the wrong type is not inspected further,
//!    because structural checks on it would only produce cascading noise.
//! 3. `enum`, then the checks for the value's kind: `format`, lengths and
//!    `pattern` for strings; bounds and `multipleOf` for numbers; item counts,
//!    `uniqueItems` and `items` for arrays; `required`, `additionalProperties`
//!    and `properties` for objects.
//! 4. `oneOf`, `anyOf` and `allOf`, at the same document path.
//!
//! # Example
//!
//! ```rust
//! use strictspec::{schema, ErrorCollector, JsonPath, Spec, ValidationContext, ValidatorOptions, Value};
//! use serde_json::json;
//!
//! let spec = Spec::from_json_str("{}").unwrap();
//! let options = ValidatorOptions::default();
//! let context = ValidationContext::new(&spec, &options);
//!
//! let schema = Value::from(json!({"type": "string", "minLength": 3, "pattern": "^[a-z]+$"}));
//! let mut collector = ErrorCollector::new();
//! schema::validate(&Value::from("AB"), &schema, &JsonPath::root(), &context, &mut collector);
//!
//! // Both the length and the pattern violation are reported.
//! assert_eq!(collector.len(), 2);
//! ```

mod array;
mod combinators;
mod discriminator;
mod enum_;
pub mod format;
mod numeric;
mod object;
mod ref_schema;
mod string;
pub mod type_;

pub use object::suggest_property;

use crate::collector::ErrorCollector;
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::Value;

/// Validates `value` against `schema`, appending every violation to `collector`.
///
/// Error pointers start at `#/schema`.
pub fn validate(
    value: &Value,
    schema: &Value,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    validate_at(value, schema, &SchemaPointer::root(), path, context, collector);
}

/// Validates one schema node located at `pointer`.
pub(crate) fn validate_at(
    value: &Value,
    schema: &Value,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    // Boolean and other non-object schemas carry no keywords.
    let Some(keywords) = schema.as_object() else {
        return;
    };

    if let Some(reference) = keywords.get("$ref").and_then(Value::as_str) {
        ref_schema::follow(reference, value, pointer, path, context, collector);
        if keywords.len() == 1 {
            return;
        }
    }

    if !type_::validate(value, keywords, pointer, path, collector) {
        return;
    }

    enum_::validate(value, keywords, pointer, path, collector);

    match value {
        Value::String(s) => {
            format::validate(s, keywords, pointer, path, context, collector);
            string::validate(s, keywords, pointer, path, context, collector);
        }
        Value::Number(n) => numeric::validate(n, keywords, pointer, path, collector),
        Value::Array(items) => array::validate(items, keywords, pointer, path, context, collector),
        Value::Object(map) => object::validate(map, keywords, pointer, path, context, collector),
        Value::Null | Value::Bool(_) => {}
    }

    combinators::validate(value, keywords, pointer, path, context, collector);
}
