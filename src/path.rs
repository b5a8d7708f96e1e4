//! Locations inside the validated document and inside the schema.
//!
//! This module provides [`JsonPath`] and [`PathSegment`] for pointing at a value
//! in the validated document (`$.users[0].email`), and [`SchemaPointer`] for
//! pointing at the schema keyword that a value broke (`#/schema/properties/email/format`).

use std::fmt::{self, Display};

/// A segment of a JSON path.
///
/// Paths are built from segments that represent either field access or array indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Field(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in the validated document.
///
/// The root renders as `$`; fields are appended with `.` and indices with `[n]`.
///
/// # Example
///
/// ```rust
/// use strictspec::JsonPath;
///
/// let path = JsonPath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "$.users[0].email");
/// assert_eq!(JsonPath::root().to_string(), "$");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// A JSON-pointer-like reference into the schema.
///
/// Top-level schemas start at `#/schema`. Following a `$ref` restarts the
/// pointer at the reference target, e.g. `#/components/schemas/Pet`.
/// Segments containing `~` or `/` are escaped as in RFC 6901.
///
/// # Example
///
/// ```rust
/// use strictspec::SchemaPointer;
///
/// let pointer = SchemaPointer::root().push("properties").push("a/b").push("minLength");
/// assert_eq!(pointer.to_string(), "#/schema/properties/a~1b/minLength");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaPointer(String);

impl SchemaPointer {
    /// Pointer to the schema governing the whole document.
    pub fn root() -> Self {
        Self("#/schema".to_string())
    }

    /// Pointer starting at an explicit location, typically a `$ref` target.
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    /// Returns a new pointer with one (escaped) segment appended.
    pub fn push(&self, segment: impl Display) -> Self {
        let escaped = segment.to_string().replace('~', "~0").replace('/', "~1");
        Self(format!("{}/{}", self.0, escaped))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SchemaPointer {
    fn default() -> Self {
        Self::root()
    }
}

impl Display for SchemaPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_renders_dollar() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "$");
    }

    #[test]
    fn test_field_with_index() {
        let path = JsonPath::root().push_field("users").push_index(0);
        assert_eq!(path.to_string(), "$.users[0]");
    }

    #[test]
    fn test_root_index() {
        let path = JsonPath::root().push_index(3).push_field("id");
        assert_eq!(path.to_string(), "$[3].id");
    }

    #[test]
    fn test_path_immutability() {
        let base = JsonPath::root().push_field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "$.users");
        assert_eq!(path_a.to_string(), "$.users[0]");
        assert_eq!(path_b.to_string(), "$.users[1]");
    }

    #[test]
    fn test_parent_path() {
        let path = JsonPath::root()
            .push_field("users")
            .push_index(0)
            .push_field("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "$.users[0]");
        assert_eq!(parent.last(), Some(&PathSegment::Index(0)));
        assert!(JsonPath::root().parent().is_none());
    }

    #[test]
    fn test_segments_iterator() {
        let path = JsonPath::root().push_field("a").push_index(1);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec![&PathSegment::field("a"), &PathSegment::index(1)]);
    }

    #[test]
    fn test_schema_pointer_push() {
        let pointer = SchemaPointer::root().push("oneOf").push(1).push("required");
        assert_eq!(pointer.as_str(), "#/schema/oneOf/1/required");
    }

    #[test]
    fn test_schema_pointer_escapes() {
        let pointer = SchemaPointer::new("#/components/schemas/Pet").push("a~b/c");
        assert_eq!(pointer.to_string(), "#/components/schemas/Pet/a~0b~1c");
    }
}
