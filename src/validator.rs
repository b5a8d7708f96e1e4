//! The validation entry points.
//!
//! This module provides [`Validator`], which binds a shared [`Spec`] to a set
//! of [`ValidatorOptions`] and validates request and response payloads
//! against it.

use std::sync::Arc;

use rayon::prelude::*;
use stillwater::Validation;
use tracing::debug;

use crate::collector::ErrorCollector;
use crate::error::{Error, ValidationFailure};
use crate::operation::{Direction, OperationResolver, ResolveError, Target};
use crate::options::ValidatorOptions;
use crate::path::JsonPath;
use crate::schema;
use crate::spec::Spec;
use crate::validation::ValidationContext;
use crate::value::Value;
use crate::ValidationResult;

/// Validates JSON payloads against the schemas of an OpenAPI document.
///
/// A `Validator` is cheap to clone and can be shared across threads. Every
/// call collects its violations in its own collector, so concurrent calls
/// never observe each other's errors.
///
/// # Example
///
/// ```rust
/// use strictspec::{Error, Spec, Target, ValidationFailure, Validator};
///
/// let spec = Spec::from_json_str(r#"{
///     "openapi": "3.1.0",
///     "paths": {
///         "/users": {
///             "post": {
///                 "requestBody": {"content": {"application/json": {"schema": {
///                     "type": "object",
///                     "required": ["age"],
///                     "properties": {"age": {"type": "integer", "minimum": 0}}
///                 }}}},
///                 "responses": {}
///             }
///         }
///     }
/// }"#).unwrap();
///
/// let validator = Validator::new(spec);
/// let target = Target::operation("/users", "post");
///
/// assert!(validator.validate_request(r#"{"age": 35}"#, &target).is_ok());
///
/// match validator.validate_request(r#"{"age": "35"}"#, &target) {
///     Err(Error::Validation(ValidationFailure::Type(errors))) => {
///         assert_eq!(errors.first().path.to_string(), "$.age");
///     }
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    spec: Arc<Spec>,
    options: ValidatorOptions,
}

/// One payload of a batch.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    pub body: &'a str,
    pub direction: Direction,
    pub target: Target<'a>,
}

impl<'a> Payload<'a> {
    pub fn request(body: &'a str, target: Target<'a>) -> Self {
        Self {
            body,
            direction: Direction::Request,
            target,
        }
    }

    pub fn response(body: &'a str, target: Target<'a>) -> Self {
        Self {
            body,
            direction: Direction::Response,
            target,
        }
    }
}

impl Validator {
    /// Creates a validator with default options.
    pub fn new(spec: Spec) -> Self {
        Self::from_shared(Arc::new(spec))
    }

    /// Creates a validator over a spec that is already shared.
    pub fn from_shared(spec: Arc<Spec>) -> Self {
        Self {
            spec,
            options: ValidatorOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn spec(&self) -> &Spec {
        &self.spec
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validates a request body.
    ///
    /// # Errors
    ///
    /// - [`Error::Decode`] if `body` is not well-formed JSON
    /// - [`Error::Resolve`] if the path, method or status is unknown
    /// - [`Error::Validation`] with every violation, in traversal order
    pub fn validate_request(&self, body: &str, target: &Target<'_>) -> Result<(), Error> {
        self.validate_document(body, Direction::Request, target)
    }

    /// Validates a response body. See [`Validator::validate_request`].
    pub fn validate_response(&self, body: &str, target: &Target<'_>) -> Result<(), Error> {
        self.validate_document(body, Direction::Response, target)
    }

    /// Decodes `body` and validates it.
    pub fn validate_document(
        &self,
        body: &str,
        direction: Direction,
        target: &Target<'_>,
    ) -> Result<(), Error> {
        let value = Value::from_json_str(body)?;
        self.validate_value(&value, direction, target)
    }

    /// Validates an already decoded value.
    pub fn validate_value(
        &self,
        value: &Value,
        direction: Direction,
        target: &Target<'_>,
    ) -> Result<(), Error> {
        self.check(value, direction, target)?
            .into_result()
            .map_err(|errors| Error::Validation(ValidationFailure::classify(errors)))
    }

    /// Validates an already decoded value and returns the accumulated result
    /// without classifying it.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if no schema can be looked up. Violations are
    /// reported in the `Ok` value.
    pub fn check(
        &self,
        value: &Value,
        direction: Direction,
        target: &Target<'_>,
    ) -> Result<ValidationResult<()>, ResolveError> {
        check_value(&self.spec, &self.options, value, direction, target)
    }

    /// Validates many payloads in parallel.
    ///
    /// Results are returned in input order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use strictspec::{Payload, Spec, Target, Validator};
    ///
    /// let spec = Spec::from_json_str(r#"{"components": {"schemas": {"Id": {"type": "integer"}}}}"#).unwrap();
    /// let validator = Validator::new(spec);
    ///
    /// let results = validator.validate_batch(&[
    ///     Payload::request("1", Target::any()),
    ///     Payload::request("\"1\"", Target::any()),
    /// ]);
    /// assert!(results[0].is_ok());
    /// assert!(results[1].is_err());
    /// ```
    pub fn validate_batch(&self, payloads: &[Payload<'_>]) -> Vec<Result<(), Error>> {
        payloads
            .par_iter()
            .map(|payload| self.validate_document(payload.body, payload.direction, &payload.target))
            .collect()
    }
}

/// Resolves the governing schema and validates `value` against it.
pub(crate) fn check_value(
    spec: &Spec,
    options: &ValidatorOptions,
    value: &Value,
    direction: Direction,
    target: &Target<'_>,
) -> Result<ValidationResult<()>, ResolveError> {
    let Some(resolved) = OperationResolver::new(spec).resolve(direction, target)? else {
        return Ok(Validation::Success(()));
    };

    let context = ValidationContext::new(spec, options);
    let mut collector = ErrorCollector::new();
    schema::validate(
        value,
        resolved.schema,
        &JsonPath::root(),
        &context,
        &mut collector,
    );

    debug!(
        location = %resolved.location,
        errors = collector.len(),
        "validated payload"
    );
    Ok(collector.into_validation())
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator>();
    assert_sync::<Validator>();
};
