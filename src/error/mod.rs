//! Error types for validation failures.
//!
//! This module provides the per-violation record ([`ValidationError`]), the
//! accumulated collection ([`ValidationErrors`]), the classified failure
//! ([`ValidationFailure`]) and the crate-level [`Error`].

mod failure;
mod validation_error;

pub use failure::ValidationFailure;
pub use validation_error::{ConstraintKind, ErrorCategory, ValidationError, ValidationErrors};

use crate::operation::ResolveError;
use crate::spec::SpecError;

/// Errors returned by the public validation entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payload is not well-formed JSON.
    #[error("malformed JSON document: {0}")]
    Decode(#[from] serde_json::Error),

    /// The OpenAPI document cannot be used.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// No schema governs the requested path, method or status.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The payload violates its schema.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

impl Error {
    /// Returns the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Error::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}
