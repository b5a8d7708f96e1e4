//! Operation lookup: from (path, method, status) to the governing schema.
//!
//! This module provides [`OperationResolver`], which finds the request or
//! response schema for a concrete request path, and [`ResolveError`] for the
//! structural not-found cases. Templated paths such as `/users/{id}` are
//! compiled into fixed-segment-count patterns once, when the [`Spec`] is built.

use regex::Regex;
use tracing::{debug, trace};

use crate::spec::Spec;
use crate::value::{Map, Value};

const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Which side of an operation a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The `requestBody` of an operation.
    Request,
    /// One entry of an operation's `responses`.
    Response,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Request => "request",
            Direction::Response => "response",
        }
    }
}

/// What a payload was sent to or returned from.
///
/// Every field is optional. Leaving out the path selects the first schema found
/// in the document (single-schema mode); leaving out the method or status
/// selects the first declared one.
///
/// # Example
///
/// ```rust
/// use strictspec::Target;
///
/// let target = Target::operation("/users/42", "GET").status(200);
/// assert_eq!(target.path, Some("/users/42"));
/// assert_eq!(target.status, Some(200));
/// assert_eq!(Target::any().path, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Target<'a> {
    pub path: Option<&'a str>,
    pub method: Option<&'a str>,
    pub status: Option<u16>,
}

impl<'a> Target<'a> {
    /// Single-schema mode: the first schema found in the document.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn operation(path: &'a str, method: &'a str) -> Self {
        Self {
            path: Some(path),
            method: Some(method),
            status: None,
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// A templated path compiled into an anchored matcher.
#[derive(Debug, Clone)]
pub(crate) struct PathTemplate {
    template: String,
    matcher: Regex,
}

impl PathTemplate {
    /// Compiles `/users/{id}/posts` into `^/users/[^/]+/posts$`.
    pub(crate) fn compile(template: &str) -> Result<Self, regex::Error> {
        let mut pattern = String::from("^");
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            pattern.push_str(&regex::escape(&rest[..open]));
            pattern.push_str("[^/]+");
            rest = &rest[open + close + 1..];
        }
        pattern.push_str(&regex::escape(rest));
        pattern.push('$');

        Ok(Self {
            template: template.to_string(),
            matcher: Regex::new(&pattern)?,
        })
    }

    pub(crate) fn template(&self) -> &str {
        &self.template
    }

    pub(crate) fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

/// The schema that governs a payload, and where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSchema<'a> {
    pub schema: &'a Value,
    /// Human-readable location, e.g. `GET /users/{id} 200`.
    pub location: String,
}

/// Looks up request and response schemas in a [`Spec`].
///
/// # Example
///
/// ```rust
/// use strictspec::{Direction, OperationResolver, Spec, Target};
///
/// let spec = Spec::from_json_str(r#"{"paths": {"/users/{id}": {"get": {"responses": {
///     "default": {"content": {"application/json": {"schema": {"type": "object"}}}}
/// }}}}}"#).unwrap();
///
/// let resolved = OperationResolver::new(&spec)
///     .resolve(Direction::Response, &Target::operation("/users/42", "GET").status(404))
///     .unwrap()
///     .unwrap();
/// assert_eq!(resolved.location, "GET /users/{id} default");
/// ```
pub struct OperationResolver<'a> {
    spec: &'a Spec,
}

impl<'a> OperationResolver<'a> {
    pub fn new(spec: &'a Spec) -> Self {
        Self { spec }
    }

    /// Finds the schema for a payload.
    ///
    /// Returns `Ok(None)` when the operation exists but declares no schema for
    /// the requested side (for example a `204` response without content).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the path, method or status is unknown.
    pub fn resolve(
        &self,
        direction: Direction,
        target: &Target<'_>,
    ) -> Result<Option<ResolvedSchema<'a>>, ResolveError> {
        let Some(path) = target.path else {
            return self.first_schema(direction).map(Some);
        };

        let (template, item) = self.find_path_item(path)?;
        let (method, operation) = self.find_operation(template, item, target.method)?;

        let resolved = match direction {
            Direction::Request => request_schema(operation).map(|schema| ResolvedSchema {
                schema,
                location: format!("{} {}", method.to_uppercase(), template),
            }),
            Direction::Response => {
                let responses = operation.get("responses").and_then(Value::as_object);
                let (status_key, response) = match target.status {
                    Some(status) => {
                        let found = responses.and_then(|r| find_response(r, status));
                        found.ok_or_else(|| ResolveError::StatusNotFound {
                            path: template.to_string(),
                            method: method.to_string(),
                            status,
                            available: responses
                                .map(|r| r.keys().cloned().collect())
                                .unwrap_or_default(),
                        })?
                    }
                    None => match responses.and_then(first_response) {
                        Some(found) => found,
                        None => return Ok(None),
                    },
                };
                media_schema(response).map(|schema| ResolvedSchema {
                    schema,
                    location: format!("{} {} {}", method.to_uppercase(), template, status_key),
                })
            }
        };

        match &resolved {
            Some(found) => debug!(location = %found.location, "resolved {} schema", direction.as_str()),
            None => debug!(path, "operation declares no {} schema", direction.as_str()),
        }
        Ok(resolved)
    }

    /// Finds the path item for a concrete path: exact key first, then the first
    /// templated path that matches structurally.
    pub fn find_path_item(&self, path: &str) -> Result<(&'a str, &'a Value), ResolveError> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let not_found = || ResolveError::PathNotFound {
            path: path.to_string(),
            available: self.spec.path_names().iter().map(|p| p.to_string()).collect(),
        };
        let paths = self.spec.paths().ok_or_else(not_found)?;

        if let Some((key, item)) = paths.get_key_value(path) {
            trace!(path, "exact path match");
            return Ok((key.as_str(), item));
        }

        for template in self.spec.templates() {
            if template.matches(path) {
                if let Some((key, item)) = paths.get_key_value(template.template()) {
                    trace!(path, template = key.as_str(), "templated path match");
                    return Ok((key.as_str(), item));
                }
            }
        }

        Err(not_found())
    }

    fn find_operation(
        &self,
        template: &str,
        item: &'a Value,
        method: Option<&str>,
    ) -> Result<(&'a str, &'a Value), ResolveError> {
        let allowed = || {
            operations(item)
                .map(|(name, _)| name.to_string())
                .collect::<Vec<_>>()
        };

        match method {
            Some(method) => {
                let method = method.to_lowercase();
                operations(item)
                    .find(|(name, _)| *name == method)
                    .ok_or_else(|| ResolveError::MethodNotFound {
                        path: template.to_string(),
                        method,
                        allowed: allowed(),
                    })
            }
            None => operations(item)
                .next()
                .ok_or_else(|| ResolveError::MethodNotFound {
                    path: template.to_string(),
                    method: String::new(),
                    allowed: Vec::new(),
                }),
        }
    }

    /// Single-schema mode: the first operation in document order declaring a
    /// schema on the requested side, else the first component schema.
    fn first_schema(&self, direction: Direction) -> Result<ResolvedSchema<'a>, ResolveError> {
        for (template, item) in self.spec.paths().into_iter().flatten() {
            for (method, operation) in operations(item) {
                let found = match direction {
                    Direction::Request => request_schema(operation),
                    Direction::Response => operation
                        .get("responses")
                        .and_then(Value::as_object)
                        .and_then(|responses| responses.values().find_map(media_schema)),
                };
                if let Some(schema) = found {
                    return Ok(ResolvedSchema {
                        schema,
                        location: format!("{} {}", method.to_uppercase(), template),
                    });
                }
            }
        }

        self.spec
            .component_schemas()
            .and_then(|schemas| schemas.iter().next())
            .map(|(name, schema)| ResolvedSchema {
                schema,
                location: format!("#/components/schemas/{}", name),
            })
            .ok_or(ResolveError::NoSchema(direction))
    }
}

/// Iterates the HTTP operations of a path item, in document order.
fn operations(item: &Value) -> impl Iterator<Item = (&str, &Value)> {
    item.as_object()
        .into_iter()
        .flatten()
        .filter(|(key, value)| HTTP_METHODS.contains(&key.as_str()) && value.as_object().is_some())
        .map(|(key, value)| (key.as_str(), value))
}

fn request_schema(operation: &Value) -> Option<&Value> {
    operation.get("requestBody").and_then(media_schema)
}

/// Picks the schema of `application/json`, then of any JSON media type, then
/// of the first media type that declares one.
fn media_schema(body: &Value) -> Option<&Value> {
    let content = body.get("content").and_then(Value::as_object)?;
    content
        .get("application/json")
        .and_then(|media| media.get("schema"))
        .or_else(|| {
            content
                .iter()
                .filter(|(media_type, _)| media_type.contains("json"))
                .find_map(|(_, media)| media.get("schema"))
        })
        .or_else(|| content.values().find_map(|media| media.get("schema")))
}

/// Exact status code, then its range key (`2XX`), then `default`.
fn find_response(responses: &Map, status: u16) -> Option<(&str, &Value)> {
    let exact = status.to_string();
    let range = format!("{}XX", status / 100);

    responses
        .get_key_value(exact.as_str())
        .or_else(|| {
            responses
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(&range))
        })
        .or_else(|| responses.get_key_value("default"))
        .map(|(key, response)| (key.as_str(), response))
}

fn first_response(responses: &Map) -> Option<(&str, &Value)> {
    responses
        .iter()
        .find(|(_, response)| media_schema(response).is_some())
        .or_else(|| responses.iter().next())
        .map(|(key, response)| (key.as_str(), response))
}

/// Structural lookup failures, raised before any payload validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No exact or templated path matches.
    #[error("no path matches '{path}' (available paths: {})", .available.join(", "))]
    PathNotFound { path: String, available: Vec<String> },

    /// The path exists but has no such operation.
    #[error("path '{path}' has no '{method}' operation (allowed: {})", .allowed.join(", "))]
    MethodNotFound {
        path: String,
        method: String,
        allowed: Vec<String>,
    },

    /// Neither the status code, its range, nor `default` is declared.
    #[error(
        "operation '{method} {path}' declares no response for status {status} \
         (available: {})", .available.join(", ")
    )]
    StatusNotFound {
        path: String,
        method: String,
        status: u16,
        available: Vec<String>,
    },

    /// Single-schema mode found nothing to validate against.
    #[error("document declares no {} schema", .0.as_str())]
    NoSchema(Direction),
}
