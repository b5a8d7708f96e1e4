//! Integration tests for JsonPath and SchemaPointer.

use strictspec::{JsonPath, PathSegment, SchemaPointer};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(JsonPath::root().to_string(), "$");
    assert_eq!(JsonPath::root().push_field("name").to_string(), "$.name");
    assert_eq!(JsonPath::root().push_index(0).to_string(), "$[0]");

    let path = JsonPath::root()
        .push_field("users")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "$.users[0].address.city");
}

#[test]
fn test_path_segments_preserved() {
    let path = JsonPath::root()
        .push_field("data")
        .push_index(42)
        .push_field("value");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(
        segments,
        vec![
            &PathSegment::field("data"),
            &PathSegment::index(42),
            &PathSegment::field("value"),
        ]
    );
}

#[test]
fn test_path_is_immutable() {
    let base = JsonPath::root().push_field("items");

    let first = base.push_index(0);
    let second = base.push_index(1);

    assert_eq!(base.to_string(), "$.items");
    assert_eq!(first.to_string(), "$.items[0]");
    assert_eq!(second.to_string(), "$.items[1]");
}

#[test]
fn test_path_parent_and_last() {
    let path = JsonPath::root().push_field("a").push_index(2);

    assert_eq!(path.last(), Some(&PathSegment::Index(2)));
    assert_eq!(path.parent().unwrap().to_string(), "$.a");
    assert_eq!(JsonPath::root().parent(), None);
}

#[test]
fn test_schema_pointer_root_and_push() {
    let pointer = SchemaPointer::root()
        .push("properties")
        .push("tags")
        .push("items")
        .push(0)
        .push("minLength");

    assert_eq!(pointer.as_str(), "#/schema/properties/tags/items/0/minLength");
    assert_eq!(SchemaPointer::default(), SchemaPointer::root());
}

#[test]
fn test_schema_pointer_escapes_segments() {
    let pointer = SchemaPointer::new("#/components/schemas/Pet")
        .push("properties")
        .push("a~b/c");

    assert_eq!(
        pointer.to_string(),
        "#/components/schemas/Pet/properties/a~0b~1c"
    );
}
