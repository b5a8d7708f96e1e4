//! # Strictspec
//!
//! A strict OpenAPI 3.1 payload validator that accumulates ALL violations,
//! reporting every problem in a document rather than stopping at the first.
//!
//! ## Overview
//!
//! Validation is zero-coercion: the string `"35"` is not an integer, `35.0` is
//! not an integer either, `"true"` is not a boolean and `null` is only accepted
//! where the schema allows it. Every violation carries the document path, the
//! schema keyword that was broken, the expected and received values and, where
//! one can be computed, a hint such as "did you mean `name`?".
//!
//! Errors are accumulated through stillwater's `Validation` type, and a failed
//! call is classified into a [`ValidationFailure`] by the kind of violations
//! it contains.
//!
//! ## Core Types
//!
//! - [`Spec`]: an immutable OpenAPI document, shared read-only across calls
//! - [`Validator`]: validates request and response bodies against a spec
//! - [`Target`]: the path, method and status a payload belongs to
//! - [`ValidationError`]: a single violation with path, pointer and hint
//! - [`ValidationErrors`]: a non-empty, ordered collection of violations
//!
//! ## Example
//!
//! ```rust
//! use strictspec::{validate_request, Spec};
//!
//! let spec = Spec::from_json_str(r#"{
//!     "openapi": "3.1.0",
//!     "paths": {
//!         "/users": {
//!             "post": {
//!                 "requestBody": {"content": {"application/json": {"schema": {
//!                     "type": "object",
//!                     "required": ["name"],
//!                     "properties": {"name": {"type": "string"}},
//!                     "additionalProperties": false
//!                 }}}},
//!                 "responses": {}
//!             }
//!         }
//!     }
//! }"#).unwrap();
//!
//! assert!(validate_request(r#"{"name": "Ada"}"#, &spec, Some("/users"), Some("post")).is_ok());
//!
//! let err = validate_request(r#"{"nam": "Ada"}"#, &spec, Some("/users"), Some("post")).unwrap_err();
//! let failure = err.as_validation().unwrap();
//! assert_eq!(failure.errors().len(), 2);
//! assert!(err.to_string().starts_with("Validation failed with 2 error(s):"));
//! ```

pub mod collector;
pub mod error;
pub mod operation;
pub mod options;
pub mod path;
pub mod pattern;
pub mod schema;
pub mod spec;
pub mod validation;
pub mod validator;
pub mod value;

pub use collector::ErrorCollector;
pub use error::{
    ConstraintKind, Error, ErrorCategory, ValidationError, ValidationErrors, ValidationFailure,
};
pub use operation::{Direction, OperationResolver, ResolveError, ResolvedSchema, Target};
pub use options::ValidatorOptions;
pub use path::{JsonPath, PathSegment, SchemaPointer};
pub use spec::{Spec, SpecError};
pub use validation::ValidationContext;
pub use validator::{Payload, Validator};
pub use value::{Map, Number, Value};

/// Type alias for validation results using ValidationErrors
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;

/// Validates a request body against `spec` with default options.
///
/// Leaving out `path` validates against the first schema in the document.
/// Leaving out `method` selects the path's first operation.
///
/// # Errors
///
/// See [`Validator::validate_request`].
pub fn validate_request(
    body: &str,
    spec: &Spec,
    path: Option<&str>,
    method: Option<&str>,
) -> Result<(), Error> {
    let target = Target {
        path,
        method,
        status: None,
    };
    validate_with(body, spec, Direction::Request, &target)
}

/// Validates a response body against `spec` with default options.
///
/// Leaving out `status` selects the operation's first response with a schema.
///
/// # Errors
///
/// See [`Validator::validate_response`].
pub fn validate_response(
    body: &str,
    spec: &Spec,
    path: Option<&str>,
    method: Option<&str>,
    status: Option<u16>,
) -> Result<(), Error> {
    let target = Target {
        path,
        method,
        status,
    };
    validate_with(body, spec, Direction::Response, &target)
}

fn validate_with(
    body: &str,
    spec: &Spec,
    direction: Direction,
    target: &Target<'_>,
) -> Result<(), Error> {
    let value = Value::from_json_str(body)?;
    validator::check_value(spec, &ValidatorOptions::default(), &value, direction, target)?
        .into_result()
        .map_err(|errors| Error::Validation(ValidationFailure::classify(errors)))
}
