//! Classification of a failed validation into a typed error kind.

use thiserror::Error;

use super::validation_error::{ErrorCategory, ValidationErrors};

/// A failed validation, classified by the kind of violations it contains.
///
/// Every variant carries the complete, ordered list of violations found during
/// the call. When all violations share one [`ErrorCategory`] the matching
/// specific variant is used; a mix of categories yields
/// [`ValidationFailure::SchemaViolation`].
///
/// The `Display` output is the full multi-line diagnostic report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationFailure {
    #[error("{0}")]
    Type(ValidationErrors),
    #[error("{0}")]
    Required(ValidationErrors),
    #[error("{0}")]
    AdditionalProperties(ValidationErrors),
    #[error("{0}")]
    Format(ValidationErrors),
    #[error("{0}")]
    Boundary(ValidationErrors),
    #[error("{0}")]
    Enum(ValidationErrors),
    #[error("{0}")]
    Pattern(ValidationErrors),
    #[error("{0}")]
    Composition(ValidationErrors),
    #[error("{0}")]
    Discriminator(ValidationErrors),
    /// Violations of more than one category, or of no specific category.
    #[error("{0}")]
    SchemaViolation(ValidationErrors),
}

impl ValidationFailure {
    /// Maps an accumulated error set to its error kind.
    pub fn classify(errors: ValidationErrors) -> Self {
        match errors.common_category() {
            Some(ErrorCategory::Type) => ValidationFailure::Type(errors),
            Some(ErrorCategory::Required) => ValidationFailure::Required(errors),
            Some(ErrorCategory::AdditionalProperties) => {
                ValidationFailure::AdditionalProperties(errors)
            }
            Some(ErrorCategory::Format) => ValidationFailure::Format(errors),
            Some(ErrorCategory::Boundary) => ValidationFailure::Boundary(errors),
            Some(ErrorCategory::Enum) => ValidationFailure::Enum(errors),
            Some(ErrorCategory::Pattern) => ValidationFailure::Pattern(errors),
            Some(ErrorCategory::Composition) => ValidationFailure::Composition(errors),
            Some(ErrorCategory::Discriminator) => ValidationFailure::Discriminator(errors),
            Some(ErrorCategory::Schema) | None => ValidationFailure::SchemaViolation(errors),
        }
    }

    /// Returns the violations carried by this failure.
    pub fn errors(&self) -> &ValidationErrors {
        match self {
            ValidationFailure::Type(e)
            | ValidationFailure::Required(e)
            | ValidationFailure::AdditionalProperties(e)
            | ValidationFailure::Format(e)
            | ValidationFailure::Boundary(e)
            | ValidationFailure::Enum(e)
            | ValidationFailure::Pattern(e)
            | ValidationFailure::Composition(e)
            | ValidationFailure::Discriminator(e)
            | ValidationFailure::SchemaViolation(e) => e,
        }
    }

    pub fn into_errors(self) -> ValidationErrors {
        match self {
            ValidationFailure::Type(e)
            | ValidationFailure::Required(e)
            | ValidationFailure::AdditionalProperties(e)
            | ValidationFailure::Format(e)
            | ValidationFailure::Boundary(e)
            | ValidationFailure::Enum(e)
            | ValidationFailure::Pattern(e)
            | ValidationFailure::Composition(e)
            | ValidationFailure::Discriminator(e)
            | ValidationFailure::SchemaViolation(e) => e,
        }
    }

    /// Returns the specific category, or `None` for a generic schema violation.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            ValidationFailure::Type(_) => Some(ErrorCategory::Type),
            ValidationFailure::Required(_) => Some(ErrorCategory::Required),
            ValidationFailure::AdditionalProperties(_) => {
                Some(ErrorCategory::AdditionalProperties)
            }
            ValidationFailure::Format(_) => Some(ErrorCategory::Format),
            ValidationFailure::Boundary(_) => Some(ErrorCategory::Boundary),
            ValidationFailure::Enum(_) => Some(ErrorCategory::Enum),
            ValidationFailure::Pattern(_) => Some(ErrorCategory::Pattern),
            ValidationFailure::Composition(_) => Some(ErrorCategory::Composition),
            ValidationFailure::Discriminator(_) => Some(ErrorCategory::Discriminator),
            ValidationFailure::SchemaViolation(_) => None,
        }
    }
}
