//! Validation context for schema reference resolution.
//!
//! This module provides the [`ValidationContext`] type that carries the spec,
//! the options and `$ref` depth tracking through a validation call.

use crate::options::ValidatorOptions;
use crate::spec::Spec;

/// Context passed down the recursive descent.
///
/// The context is cheap to copy. Following a `$ref` produces a new context
/// with an incremented depth, and stepping into a property or item resets it.
/// Only a chain of `$ref` hops on one value is bounded, so `Loop -> Loop`
/// terminates while arbitrarily deep data that follows a recursive schema
/// does not hit the limit.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    spec: &'a Spec,
    options: &'a ValidatorOptions,
    depth: usize,
}

impl<'a> ValidationContext<'a> {
    pub fn new(spec: &'a Spec, options: &'a ValidatorOptions) -> Self {
        Self {
            spec,
            options,
            depth: 0,
        }
    }

    /// Creates a new context with incremented depth.
    pub fn increment_depth(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Creates the context for a child value: the `$ref` chain starts over.
    pub fn descend(&self) -> Self {
        Self { depth: 0, ..*self }
    }

    /// Returns the number of `$ref` hops taken on the current value.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true once the `$ref` chain has reached the configured limit.
    pub fn depth_exceeded(&self) -> bool {
        self.depth >= self.options.max_ref_depth()
    }

    pub fn spec(&self) -> &'a Spec {
        self.spec
    }

    pub fn options(&self) -> &'a ValidatorOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_depth_resets_for_child_values() {
        let spec = Spec::from_value(Value::from(serde_json::json!({}))).unwrap();
        let options = ValidatorOptions::new().with_max_ref_depth(2);
        let context = ValidationContext::new(&spec, &options);

        let followed = context.increment_depth().increment_depth();
        assert_eq!(followed.depth(), 2);
        assert!(followed.depth_exceeded());

        let child = followed.descend();
        assert_eq!(child.depth(), 0);
        assert!(!child.depth_exceeded());
    }
}
