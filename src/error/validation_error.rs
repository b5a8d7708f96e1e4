//! Validation error records.
//!
//! This module provides [`ValidationError`] for a single violation,
//! [`ConstraintKind`] for the keyword that was violated, and
//! [`ValidationErrors`] for a non-empty, ordered collection of violations.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::{JsonPath, SchemaPointer};
use crate::value::Value;

/// The schema keyword a violation was reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Type,
    Required,
    AdditionalProperties,
    Format,
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    MinLength,
    MaxLength,
    MinItems,
    MaxItems,
    UniqueItems,
    MultipleOf,
    Enum,
    Pattern,
    OneOf,
    AnyOf,
    AllOf,
    Discriminator,
    /// A `$ref` that could not be followed.
    Reference,
}

impl ConstraintKind {
    /// Returns the keyword name as written in a schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Type => "type",
            ConstraintKind::Required => "required",
            ConstraintKind::AdditionalProperties => "additionalProperties",
            ConstraintKind::Format => "format",
            ConstraintKind::Minimum => "minimum",
            ConstraintKind::Maximum => "maximum",
            ConstraintKind::ExclusiveMinimum => "exclusiveMinimum",
            ConstraintKind::ExclusiveMaximum => "exclusiveMaximum",
            ConstraintKind::MinLength => "minLength",
            ConstraintKind::MaxLength => "maxLength",
            ConstraintKind::MinItems => "minItems",
            ConstraintKind::MaxItems => "maxItems",
            ConstraintKind::UniqueItems => "uniqueItems",
            ConstraintKind::MultipleOf => "multipleOf",
            ConstraintKind::Enum => "enum",
            ConstraintKind::Pattern => "pattern",
            ConstraintKind::OneOf => "oneOf",
            ConstraintKind::AnyOf => "anyOf",
            ConstraintKind::AllOf => "allOf",
            ConstraintKind::Discriminator => "discriminator",
            ConstraintKind::Reference => "$ref",
        }
    }

    /// Returns the error category this keyword belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConstraintKind::Type => ErrorCategory::Type,
            ConstraintKind::Required => ErrorCategory::Required,
            ConstraintKind::AdditionalProperties => ErrorCategory::AdditionalProperties,
            ConstraintKind::Format => ErrorCategory::Format,
            ConstraintKind::Minimum
            | ConstraintKind::Maximum
            | ConstraintKind::ExclusiveMinimum
            | ConstraintKind::ExclusiveMaximum
            | ConstraintKind::MinLength
            | ConstraintKind::MaxLength
            | ConstraintKind::MinItems
            | ConstraintKind::MaxItems
            | ConstraintKind::UniqueItems
            | ConstraintKind::MultipleOf => ErrorCategory::Boundary,
            ConstraintKind::Enum => ErrorCategory::Enum,
            ConstraintKind::Pattern => ErrorCategory::Pattern,
            ConstraintKind::OneOf | ConstraintKind::AnyOf | ConstraintKind::AllOf => {
                ErrorCategory::Composition
            }
            ConstraintKind::Discriminator => ErrorCategory::Discriminator,
            ConstraintKind::Reference => ErrorCategory::Schema,
        }
    }
}

impl Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Families of constraint kinds, used to classify a failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Type,
    Required,
    AdditionalProperties,
    Format,
    /// Numeric bounds, lengths, item counts, uniqueness and `multipleOf`.
    Boundary,
    Enum,
    Pattern,
    /// `oneOf`, `anyOf` and `allOf`.
    Composition,
    Discriminator,
    /// Anything not covered by a more specific category.
    Schema,
}

/// A single violation found while validating a document.
///
/// - **path**: where in the document the violation occurred (`$.user.email`)
/// - **spec_reference**: the schema keyword that was broken (`#/schema/properties/email/format`)
/// - **constraint**: the keyword kind
/// - **expected** / **received**: display values
/// - **reason**: a human-readable sentence
/// - **hint**: an optional suggestion for fixing the document
///
/// # Example
///
/// ```rust
/// use strictspec::{ConstraintKind, JsonPath, SchemaPointer, ValidationError};
///
/// let error = ValidationError::new(
///     JsonPath::root().push_field("age"),
///     SchemaPointer::root().push("properties").push("age").push("minimum"),
///     ConstraintKind::Minimum,
///     "value -1 is less than the minimum of 0",
/// )
/// .with_expected(0i64)
/// .with_received(-1i64);
///
/// assert_eq!(error.constraint, ConstraintKind::Minimum);
/// assert_eq!(error.path.to_string(), "$.age");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub path: JsonPath,
    pub spec_reference: SchemaPointer,
    pub constraint: ConstraintKind,
    pub expected: Option<Value>,
    pub received: Option<Value>,
    pub reason: String,
    pub hint: Option<String>,
}

impl ValidationError {
    pub fn new(
        path: JsonPath,
        spec_reference: SchemaPointer,
        constraint: ConstraintKind,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path,
            spec_reference,
            constraint,
            expected: None,
            received: None,
            reason: reason.into(),
            hint: None,
        }
    }

    /// Sets the expected display value and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Sets the received display value and returns self for chaining.
    pub fn with_received(mut self, received: impl Into<Value>) -> Self {
        self.received = Some(received.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Sets the hint when one is available.
    pub fn with_optional_hint(mut self, hint: Option<String>) -> Self {
        self.hint = hint;
        self
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}, breaking {} expectations",
            self.reason, self.path, self.spec_reference
        )?;
        if let Some(ref expected) = self.expected {
            write!(f, "\n    expected: {}", expected)?;
        }
        if let Some(ref received) = self.received {
            if self.expected.as_ref() != Some(received) {
                write!(f, "\n    received: {}", received)?;
            }
        }
        if let Some(ref hint) = self.hint {
            write!(f, "\n    hint: {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty, ordered collection of validation errors.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>` so that a failed
/// validation always carries at least one error. It implements `Semigroup`,
/// so failures from separate validations can be combined:
///
/// ```rust
/// use strictspec::{ConstraintKind, JsonPath, SchemaPointer, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let missing = ValidationErrors::single(ValidationError::new(
///     JsonPath::root(),
///     SchemaPointer::root().push("required"),
///     ConstraintKind::Required,
///     "missing required property \"name\"",
/// ));
/// let unexpected = ValidationErrors::single(ValidationError::new(
///     JsonPath::root().push_field("nam"),
///     SchemaPointer::root().push("additionalProperties"),
///     ConstraintKind::AdditionalProperties,
///     "unexpected property \"nam\"",
/// ));
///
/// assert_eq!(missing.combine(unexpected).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a vec, or `None` if the vec is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = errors.next()?;
        Some(errors.fold(Self::single(head), |acc, error| {
            acc.combine(Self::single(error))
        }))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Returns all errors at the specified document path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors reported against the given keyword.
    pub fn with_constraint(&self, constraint: ConstraintKind) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| e.constraint == constraint)
            .collect()
    }

    /// Returns all errors belonging to the given category.
    pub fn in_category(&self, category: ErrorCategory) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| e.constraint.category() == category)
            .collect()
    }

    /// Returns the category shared by every error, or `None` when mixed.
    pub fn common_category(&self) -> Option<ErrorCategory> {
        let first = self.first().constraint.category();
        self.iter()
            .all(|e| e.constraint.category() == first)
            .then_some(first)
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    /// Renders the multi-line diagnostic report.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "[{}] {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};
