//! JSON value model.
//!
//! This module provides [`Value`], an explicit tagged union for JSON data, and
//! [`Number`], which keeps track of whether a numeric literal was written as an
//! integer or with a fraction/exponent. Integer-ness is decided by the literal
//! as it appeared in the document: `3.0` is a [`Number::Float`] even though it
//! equals `3`.
//!
//! Objects are ordered maps, so errors are reported in document order, and an
//! empty object is never confused with an empty array.
//!
//! # Example
//!
//! ```rust
//! use strictspec::{Number, Value};
//!
//! let value = Value::from_json_str(r#"{"age": 3.0, "tags": []}"#).unwrap();
//! let object = value.as_object().unwrap();
//!
//! assert_eq!(object["age"], Value::Number(Number::Float(3.0)));
//! assert_eq!(object["tags"], Value::Array(vec![]));
//! assert_eq!(object["tags"].type_name(), "array");
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Display};

use indexmap::IndexMap;

/// Ordered JSON object.
pub type Map = IndexMap<String, Value>;

/// A JSON number, tagged by its literal representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A literal without fraction or exponent, e.g. `42` or `-7`.
    Integer(i128),
    /// A literal with a fraction or exponent, e.g. `3.0` or `1e3`.
    Float(f64),
}

impl Number {
    /// Returns true if the number was written as an integer literal.
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns the number as `f64`, possibly losing precision.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Returns the integer value if this is a float with no fractional part.
    pub fn integral_value(&self) -> Option<i128> {
        match *self {
            Number::Integer(i) => Some(i),
            Number::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38 => {
                Some(f as i128)
            }
            Number::Float(_) => None,
        }
    }

    /// Compares two numbers by mathematical value.
    pub fn compare(&self, other: &Number) -> Option<Ordering> {
        match (*self, *other) {
            (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    /// Returns true if both numbers denote the same mathematical value,
    /// regardless of their literal representation.
    pub fn same_value(&self, other: &Number) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) => match serde_json::Number::from_f64(x) {
                Some(n) => write!(f, "{}", n),
                None => write!(f, "{}", x),
            },
        }
    }
}

/// A JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// Decodes a JSON document.
    ///
    /// Malformed input is rejected with the underlying `serde_json` error.
    pub fn from_json_str(input: &str) -> Result<Value, serde_json::Error> {
        let raw: serde_json::Value = serde_json::from_str(input)?;
        Ok(Value::from(raw))
    }

    /// Returns the JSON type name of this value.
    ///
    /// Numbers report `integer` or `number` depending on their literal.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(Number::Integer(_)) => "integer",
            Value::Number(Number::Float(_)) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns a non-negative integer, if this value is one.
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::Number(n) => n.integral_value().and_then(|i| usize::try_from(i).ok()),
            _ => None,
        }
    }

    /// Looks up a key if this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// JSON Schema equality: same type and same value.
    ///
    /// Numbers compare by mathematical value (`1` equals `1.0`), objects
    /// compare regardless of key order. The derived `PartialEq` is stricter
    /// and also distinguishes the numeric literal form.
    pub fn json_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.same_value(b),
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.json_eq(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(key, x)| b.get(key).is_some_and(|y| x.json_eq(y)))
            }
            (a, b) => a == b,
        }
    }
}

impl Display for Value {
    /// Renders the value as compact JSON: strings quoted, `null` literal,
    /// arrays and objects inline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            other => write!(f, "{}", serde_json::Value::from(other)),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(number_from_json(&n)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => number_to_json(n),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), serde_json::Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i128::from(i)))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Number(Number::Integer(i as i128))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Classifies a decoded number by its literal text.
///
/// `serde_json` keeps the literal as written, so an integer literal stays an
/// integer however large it is (as long as it fits `i128`) and `-0` is the
/// integer zero.
fn number_from_json(n: &serde_json::Number) -> Number {
    let literal = n.to_string();
    if !literal.contains(['.', 'e', 'E']) {
        if let Ok(i) = literal.parse::<i128>() {
            return Number::Integer(i);
        }
    }
    Number::Float(n.as_f64().unwrap_or(f64::NAN))
}

fn number_to_json(n: &Number) -> serde_json::Value {
    match *n {
        Number::Integer(i) => {
            if let Ok(small) = i64::try_from(i) {
                serde_json::Value::from(small)
            } else {
                i.to_string()
                    .parse::<serde_json::Number>()
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
        }
        Number::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
    }
}
