//! Numeric keywords: `minimum`, `maximum`, `exclusiveMinimum`,
//! `exclusiveMaximum` and `multipleOf`.
//!
//! Both the OpenAPI 3.1 numeric form of the exclusive bounds and the 3.0
//! boolean form (`exclusiveMinimum: true` next to `minimum`) are honored.

use std::cmp::Ordering;

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::value::{Map, Number, Value};

const MULTIPLE_OF_EPSILON: f64 = 1e-9;

pub(crate) fn validate(
    n: &Number,
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    collector: &mut ErrorCollector,
) {
    let lower_exclusive_flag = flag(schema, "exclusiveMinimum");
    let upper_exclusive_flag = flag(schema, "exclusiveMaximum");

    if let Some(minimum) = number(schema, "minimum") {
        if lower_exclusive_flag {
            check_exclusive_minimum(n, minimum, &pointer.push("exclusiveMinimum"), path, collector);
        } else if n.compare(minimum) == Some(Ordering::Less) {
            collector.push(bound_error(
                n,
                minimum,
                ConstraintKind::Minimum,
                pointer.push("minimum"),
                path,
            ));
        }
    }
    if let Some(bound) = number(schema, "exclusiveMinimum") {
        check_exclusive_minimum(n, bound, &pointer.push("exclusiveMinimum"), path, collector);
    }

    if let Some(maximum) = number(schema, "maximum") {
        if upper_exclusive_flag {
            check_exclusive_maximum(n, maximum, &pointer.push("exclusiveMaximum"), path, collector);
        } else if n.compare(maximum) == Some(Ordering::Greater) {
            collector.push(bound_error(
                n,
                maximum,
                ConstraintKind::Maximum,
                pointer.push("maximum"),
                path,
            ));
        }
    }
    if let Some(bound) = number(schema, "exclusiveMaximum") {
        check_exclusive_maximum(n, bound, &pointer.push("exclusiveMaximum"), path, collector);
    }

    if let Some(divisor) = number(schema, "multipleOf") {
        if divisor.as_f64() > 0.0 && !is_multiple_of(n, divisor) {
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer.push("multipleOf"),
                    ConstraintKind::MultipleOf,
                    format!("{} is not a multiple of {}", n, divisor),
                )
                .with_expected(*divisor)
                .with_received(*n),
            );
        }
    }
}

/// Returns true if `n` divided by `divisor` is a whole number.
///
/// Integer operands are checked exactly. Otherwise the quotient is computed
/// in floating point and compared to its nearest integer within a small
/// tolerance, so that `0.3` is a multiple of `0.1`.
pub(crate) fn is_multiple_of(n: &Number, divisor: &Number) -> bool {
    match (*n, *divisor) {
        (Number::Integer(value), Number::Integer(step)) if step != 0 => value % step == 0,
        _ => {
            let quotient = n.as_f64() / divisor.as_f64();
            quotient.is_finite() && (quotient - quotient.round()).abs() < MULTIPLE_OF_EPSILON
        }
    }
}

fn check_exclusive_minimum(
    n: &Number,
    bound: &Number,
    pointer: &SchemaPointer,
    path: &JsonPath,
    collector: &mut ErrorCollector,
) {
    if n.compare(bound) == Some(Ordering::Greater) {
        return;
    }
    let error = bound_error(n, bound, ConstraintKind::ExclusiveMinimum, pointer.clone(), path);
    let error = if n.same_value(bound) {
        error.with_hint(format!(
            "the bound is exclusive; the value must be strictly greater than {}",
            bound
        ))
    } else {
        error
    };
    collector.push(error);
}

fn check_exclusive_maximum(
    n: &Number,
    bound: &Number,
    pointer: &SchemaPointer,
    path: &JsonPath,
    collector: &mut ErrorCollector,
) {
    if n.compare(bound) == Some(Ordering::Less) {
        return;
    }
    let error = bound_error(n, bound, ConstraintKind::ExclusiveMaximum, pointer.clone(), path);
    let error = if n.same_value(bound) {
        error.with_hint(format!(
            "the bound is exclusive; the value must be strictly less than {}",
            bound
        ))
    } else {
        error
    };
    collector.push(error);
}

fn bound_error(
    n: &Number,
    bound: &Number,
    constraint: ConstraintKind,
    pointer: SchemaPointer,
    path: &JsonPath,
) -> ValidationError {
    let reason = match constraint {
        ConstraintKind::Minimum => format!("{} is less than the minimum of {}", n, bound),
        ConstraintKind::Maximum => format!("{} is greater than the maximum of {}", n, bound),
        ConstraintKind::ExclusiveMinimum => format!("{} is not greater than {}", n, bound),
        _ => format!("{} is not less than {}", n, bound),
    };
    ValidationError::new(path.clone(), pointer, constraint, reason)
        .with_expected(*bound)
        .with_received(*n)
}

fn number<'a>(schema: &'a Map, keyword: &str) -> Option<&'a Number> {
    schema.get(keyword).and_then(Value::as_number)
}

fn flag(schema: &Map, keyword: &str) -> bool {
    schema.get(keyword).and_then(Value::as_bool) == Some(true)
}
