//! Call-scoped error accumulation.

use stillwater::Validation;

use crate::error::{ValidationError, ValidationErrors, ValidationFailure};
use crate::ValidationResult;

/// An ordered, append-only list of violations for one validation call.
///
/// Constraint checks push into the collector and return normally; nothing is
/// raised mid-traversal. Composition keywords validate each branch into a fresh
/// collector and decide afterwards what, if anything, to keep.
///
/// # Example
///
/// ```rust
/// use strictspec::{ConstraintKind, ErrorCollector, JsonPath, SchemaPointer, ValidationError};
///
/// let mut collector = ErrorCollector::new();
/// assert!(collector.into_result().is_ok());
///
/// let mut collector = ErrorCollector::new();
/// collector.push(ValidationError::new(
///     JsonPath::root(),
///     SchemaPointer::root().push("type"),
///     ConstraintKind::Type,
///     "expected string, received integer",
/// ));
/// assert_eq!(collector.len(), 1);
/// assert!(collector.into_result().is_err());
/// ```
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<ValidationError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Appends every error of another collector, keeping order.
    pub fn absorb(&mut self, other: ErrorCollector) {
        self.errors.extend(other.errors);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Converts the collected errors into an accumulated validation result.
    pub fn into_validation(self) -> ValidationResult<()> {
        match ValidationErrors::from_vec(self.errors) {
            None => Validation::Success(()),
            Some(errors) => Validation::Failure(errors),
        }
    }

    /// Finishes a top-level call: success, or a classified failure.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        self.into_validation()
            .into_result()
            .map_err(ValidationFailure::classify)
    }
}
