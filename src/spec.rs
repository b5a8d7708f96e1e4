//! The parsed OpenAPI document and `$ref` resolution.
//!
//! This module provides [`Spec`], an immutable OpenAPI 3.1 document shared
//! read-only across any number of validation calls, and [`SpecError`] for
//! documents that cannot be used at all.

use fancy_regex::Regex;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::operation::PathTemplate;
use crate::pattern;
use crate::value::{Map, Value};

const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Type alias for the compiled pattern cache.
type PatternCache = RwLock<HashMap<String, Arc<Regex>>>;

/// A parsed OpenAPI document.
///
/// The document is never mutated after construction. Templated paths are
/// compiled once, up front. Compiled `pattern` expressions are cached behind a
/// `RwLock`, which only ever stores values derived from the immutable document,
/// so concurrent validations see identical behavior with or without the cache.
///
/// # Example
///
/// ```rust
/// use strictspec::Spec;
///
/// let spec = Spec::from_json_str(r#"{
///     "openapi": "3.1.0",
///     "paths": {},
///     "components": {"schemas": {"Pet": {"type": "object"}}}
/// }"#).unwrap();
///
/// assert!(spec.resolve_ref("#/components/schemas/Pet").is_some());
/// assert!(spec.resolve_ref("#/components/schemas/Dog").is_none());
/// ```
#[derive(Debug)]
pub struct Spec {
    document: Value,
    templates: Vec<PathTemplate>,
    patterns: PatternCache,
}

impl Spec {
    /// Builds a spec from an already decoded document.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] if the root, `paths` or `components.schemas` is
    /// not an object. Deeper structural linting is not performed.
    pub fn from_value(document: Value) -> Result<Self, SpecError> {
        let root = document.as_object().ok_or(SpecError::NotAnObject)?;

        if let Some(paths) = root.get("paths") {
            if paths.as_object().is_none() {
                return Err(SpecError::InvalidSection("paths"));
            }
        }
        if let Some(schemas) = root.get("components").and_then(|c| c.get("schemas")) {
            if schemas.as_object().is_none() {
                return Err(SpecError::InvalidSection("components.schemas"));
            }
        }

        let templates = root
            .get("paths")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|paths| paths.keys())
            .filter(|key| key.contains('{'))
            .map(|key| PathTemplate::compile(key))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            document,
            templates,
            patterns: RwLock::new(HashMap::new()),
        })
    }

    /// Parses a spec from JSON text.
    pub fn from_json_str(input: &str) -> Result<Self, SpecError> {
        Self::from_value(Value::from_json_str(input)?)
    }

    /// Parses a spec from YAML text.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(input: &str) -> Result<Self, SpecError> {
        let raw: serde_json::Value = serde_yaml::from_str(input)?;
        Self::from_value(Value::from(raw))
    }

    /// Returns the whole document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Returns the `paths` table.
    pub fn paths(&self) -> Option<&Map> {
        self.document.get("paths").and_then(Value::as_object)
    }

    /// Returns the path keys in document order.
    pub fn path_names(&self) -> Vec<&str> {
        self.paths()
            .map(|paths| paths.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the compiled templated paths in document order.
    pub(crate) fn templates(&self) -> &[PathTemplate] {
        &self.templates
    }

    /// Returns `components.schemas`.
    pub fn component_schemas(&self) -> Option<&Map> {
        self.document
            .get("components")
            .and_then(|components| components.get("schemas"))
            .and_then(Value::as_object)
    }

    /// Resolves a `#/components/schemas/<Name>` reference.
    ///
    /// Any other reference form is unsupported and resolves to `None`.
    pub fn resolve_ref(&self, reference: &str) -> Option<&Value> {
        let name = reference.strip_prefix(COMPONENT_SCHEMA_PREFIX)?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        let name = name.replace("~1", "/").replace("~0", "~");
        self.component_schemas()?.get(&name)
    }

    /// Compiles a `pattern` keyword, reusing a cached expression when allowed.
    pub(crate) fn regex(
        &self,
        source: &str,
        use_cache: bool,
    ) -> Result<Arc<Regex>, pattern::Error> {
        if !use_cache {
            return pattern::compile(source).map(Arc::new);
        }
        if let Some(regex) = self.patterns.read().get(source) {
            return Ok(Arc::clone(regex));
        }
        let regex = Arc::new(pattern::compile(source)?);
        self.patterns
            .write()
            .entry(source.to_string())
            .or_insert_with(|| Arc::clone(&regex));
        Ok(regex)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Spec>();
    assert_sync::<Spec>();
};

/// Errors for documents that cannot be used as a spec.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The document root is not an object.
    #[error("OpenAPI document must be a JSON object")]
    NotAnObject,

    /// A section that must be an object is something else.
    #[error("OpenAPI document section `{0}` must be an object")]
    InvalidSection(&'static str),

    /// A templated path could not be turned into a matcher.
    #[error("invalid path template: {0}")]
    PathTemplate(#[from] regex::Error),

    /// The document is not valid JSON.
    #[error("OpenAPI document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[cfg(feature = "yaml")]
    #[error("OpenAPI document is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(document: serde_json::Value) -> Spec {
        Spec::from_value(Value::from(document)).unwrap()
    }

    #[test]
    fn test_rejects_non_object_root() {
        let result = Spec::from_value(Value::from(json!([])));
        assert!(matches!(result, Err(SpecError::NotAnObject)));
    }

    #[test]
    fn test_rejects_non_object_paths() {
        let result = Spec::from_value(Value::from(json!({"paths": []})));
        assert!(matches!(result, Err(SpecError::InvalidSection("paths"))));
    }

    #[test]
    fn test_rejects_non_object_component_schemas() {
        let result = Spec::from_value(Value::from(json!({"components": {"schemas": 1}})));
        assert!(matches!(
            result,
            Err(SpecError::InvalidSection("components.schemas"))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Spec::from_json_str("{"),
            Err(SpecError::Json(_))
        ));
    }

    #[test]
    fn test_resolve_component_ref() {
        let spec = spec(json!({
            "components": {"schemas": {"Pet": {"type": "object"}, "a/b": {"type": "string"}}}
        }));

        assert_eq!(
            spec.resolve_ref("#/components/schemas/Pet"),
            Some(&Value::from(json!({"type": "object"})))
        );
        assert!(spec.resolve_ref("#/components/schemas/a~1b").is_some());
        assert!(spec.resolve_ref("#/components/schemas/").is_none());
        assert!(spec.resolve_ref("#/definitions/Pet").is_none());
        assert!(spec.resolve_ref("other.json#/components/schemas/Pet").is_none());
    }

    #[test]
    fn test_path_names_in_order() {
        let spec = spec(json!({"paths": {"/b": {}, "/a/{id}": {}, "/c": {}}}));
        assert_eq!(spec.path_names(), vec!["/b", "/a/{id}", "/c"]);
        assert_eq!(spec.templates().len(), 1);
    }

    #[test]
    fn test_regex_cache_reuses_compiled_pattern() {
        let spec = spec(json!({}));
        let first = spec.regex("^[a-z]+$", true).unwrap();
        let second = spec.regex("^[a-z]+$", true).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let uncached = spec.regex("^[a-z]+$", false).unwrap();
        assert!(!Arc::ptr_eq(&first, &uncached));
        assert!(spec.regex("(", true).is_err());
    }
}
