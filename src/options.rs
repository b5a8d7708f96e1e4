//! Validator configuration.

/// Options controlling how documents are validated.
///
/// # Example
///
/// ```rust
/// use strictspec::ValidatorOptions;
///
/// let options = ValidatorOptions::new()
///     .with_max_ref_depth(32)
///     .with_formats(false);
///
/// assert_eq!(options.max_ref_depth(), 32);
/// assert!(!options.validate_formats());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    max_ref_depth: usize,
    validate_formats: bool,
    suggestion_distance: usize,
    cache_patterns: bool,
}

impl ValidatorOptions {
    /// Creates options with the defaults: ref depth 100, formats checked,
    /// suggestions within edit distance 2, pattern cache enabled.
    pub fn new() -> Self {
        Self {
            max_ref_depth: 100,
            validate_formats: true,
            suggestion_distance: 2,
            cache_patterns: true,
        }
    }

    /// Sets the maximum number of consecutive `$ref` hops on one value.
    ///
    /// Recursive component schemas are legal and the count starts over at
    /// every property and item; a chain longer than this on a single value
    /// (such as `A -> B -> A`) records a `$ref` violation instead of recursing
    /// further.
    pub fn with_max_ref_depth(mut self, depth: usize) -> Self {
        self.max_ref_depth = depth;
        self
    }

    /// Turns `format` checking on or off. When off, `format` is annotation-only.
    pub fn with_formats(mut self, enabled: bool) -> Self {
        self.validate_formats = enabled;
        self
    }

    /// Sets the maximum edit distance for "did you mean" property hints.
    pub fn with_suggestion_distance(mut self, distance: usize) -> Self {
        self.suggestion_distance = distance;
        self
    }

    /// Enables or disables reuse of compiled `pattern` expressions.
    pub fn with_pattern_cache(mut self, enabled: bool) -> Self {
        self.cache_patterns = enabled;
        self
    }

    pub fn max_ref_depth(&self) -> usize {
        self.max_ref_depth
    }

    pub fn validate_formats(&self) -> bool {
        self.validate_formats
    }

    pub fn suggestion_distance(&self) -> usize {
        self.suggestion_distance
    }

    pub fn cache_patterns(&self) -> bool {
        self.cache_patterns
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self::new()
    }
}
