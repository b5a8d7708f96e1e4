//! String keywords: `minLength`, `maxLength` and `pattern`.

use tracing::warn;

use crate::collector::ErrorCollector;
use crate::error::{ConstraintKind, ValidationError};
use crate::path::{JsonPath, SchemaPointer};
use crate::validation::ValidationContext;
use crate::value::{Map, Value};

pub(crate) fn validate(
    s: &str,
    schema: &Map,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    // Lengths count Unicode scalar values, not bytes.
    let length = s.chars().count();

    if let Some(min) = schema.get("minLength").and_then(Value::as_usize) {
        if length < min {
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer.push("minLength"),
                    ConstraintKind::MinLength,
                    format!(
                        "string has {} characters, fewer than the minimum of {}",
                        length, min
                    ),
                )
                .with_expected(min)
                .with_received(length),
            );
        }
    }

    if let Some(max) = schema.get("maxLength").and_then(Value::as_usize) {
        if length > max {
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer.push("maxLength"),
                    ConstraintKind::MaxLength,
                    format!(
                        "string has {} characters, more than the maximum of {}",
                        length, max
                    ),
                )
                .with_expected(max)
                .with_received(length),
            );
        }
    }

    if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
        validate_pattern(s, pattern, pointer, path, context, collector);
    }
}

/// `pattern` is an unanchored search: `"[0-9]"` accepts `"abc1"`.
fn validate_pattern(
    s: &str,
    pattern: &str,
    pointer: &SchemaPointer,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    collector: &mut ErrorCollector,
) {
    let pointer = pointer.push("pattern");
    let regex = match context
        .spec()
        .regex(pattern, context.options().cache_patterns())
    {
        Ok(regex) => regex,
        Err(err) => {
            warn!(pattern, error = %err, "schema pattern is not a valid regular expression");
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer,
                    ConstraintKind::Pattern,
                    format!("pattern {} is not a valid regular expression", pattern),
                )
                .with_expected(pattern)
                .with_received(s)
                .with_hint(err.to_string()),
            );
            return;
        }
    };

    match regex.is_match(s) {
        Ok(true) => {}
        Ok(false) => collector.push(
            ValidationError::new(
                path.clone(),
                pointer,
                ConstraintKind::Pattern,
                format!("\"{}\" does not match pattern {}", s, pattern),
            )
            .with_expected(pattern)
            .with_received(s),
        ),
        // Backtracking gave up before deciding.
        Err(err) => {
            warn!(pattern, error = %err, "pattern match aborted");
            collector.push(
                ValidationError::new(
                    path.clone(),
                    pointer,
                    ConstraintKind::Pattern,
                    format!("\"{}\" could not be matched against pattern {}", s, pattern),
                )
                .with_expected(pattern)
                .with_received(s)
                .with_hint(err.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::test_support::{kinds, run};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!({"minLength": 3}), "abc", true ; "min length inclusive")]
    #[test_case(json!({"minLength": 3}), "ab", false ; "below min length")]
    #[test_case(json!({"maxLength": 3}), "abc", true ; "max length inclusive")]
    #[test_case(json!({"maxLength": 3}), "abcd", false ; "above max length")]
    #[test_case(json!({"maxLength": 2}), "日本", true ; "length counts characters not bytes")]
    #[test_case(json!({"minLength": 0}), "", true ; "empty string allowed")]
    fn test_length(schema: serde_json::Value, value: &str, ok: bool) {
        assert_eq!(run(schema, json!(value)).is_empty(), ok);
    }

    #[test_case("[0-9]", "abc1", true ; "unanchored search finds digit")]
    #[test_case("[0-9]", "abc", false ; "no digit")]
    #[test_case("^[a-z]+$", "abc", true ; "anchored match")]
    #[test_case("^[a-z]+$", "abc1", false ; "anchored mismatch")]
    #[test_case("b", "abc", true ; "substring in the middle")]
    #[test_case("^(?!admin$).+$", "alice", true ; "negative lookahead accepts")]
    #[test_case("^(?!admin$).+$", "admin", false ; "negative lookahead rejects")]
    #[test_case(r"^\d+$", "123", true ; "ascii digits")]
    #[test_case(r"^\d+$", "١٢٣", false ; "digit class is ascii only")]
    fn test_pattern(pattern: &str, value: &str, ok: bool) {
        let schema = json!({ "type": "string", "pattern": pattern });
        assert_eq!(run(schema, json!(value)).is_empty(), ok);
    }

    #[test]
    fn test_pattern_error_details() {
        let errors = run(json!({"pattern": "^[A-Z]{3}$"}), json!("usd"));

        assert_eq!(kinds(&errors), vec![ConstraintKind::Pattern]);
        assert_eq!(errors[0].spec_reference.as_str(), "#/schema/pattern");
        assert_eq!(errors[0].expected, Some(Value::from("^[A-Z]{3}$")));
        assert_eq!(errors[0].received, Some(Value::from("usd")));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let errors = run(json!({"pattern": "(unclosed"}), json!("x"));
        assert_eq!(kinds(&errors), vec![ConstraintKind::Pattern]);
        assert!(errors[0].reason.contains("not a valid regular expression"));
    }

    #[test]
    fn test_length_and_pattern_both_reported() {
        let errors = run(json!({"maxLength": 2, "pattern": "^[0-9]+$"}), json!("abc"));
        assert_eq!(
            kinds(&errors),
            vec![ConstraintKind::MaxLength, ConstraintKind::Pattern]
        );
    }
}
