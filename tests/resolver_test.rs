//! Integration tests for operation lookup and its not-found errors.

use serde_json::json;
use strictspec::{Direction, OperationResolver, ResolveError, Spec, Target, Value};

fn spec() -> Spec {
    Spec::from_value(Value::from(json!({
        "openapi": "3.1.0",
        "paths": {
            "/orders": {
                "get": {"responses": {"200": {"content": {"application/json": {"schema": {"type": "array"}}}}}},
                "post": {
                    "requestBody": {"content": {"application/json": {"schema": {"type": "object"}}}},
                    "responses": {
                        "201": {"content": {"application/json": {"schema": {"type": "object"}}}},
                        "5XX": {"content": {"application/problem+json": {"schema": {"type": "string"}}}}
                    }
                }
            },
            "/orders/{orderId}/items/{itemId}": {
                "get": {"responses": {"200": {"content": {"application/json": {"schema": {"type": "integer"}}}}}}
            }
        }
    })))
    .unwrap()
}

#[test]
fn test_templated_path_requires_same_segment_count() {
    let spec = spec();
    let resolver = OperationResolver::new(&spec);

    let (template, _) = resolver.find_path_item("/orders/1/items/2").unwrap();
    assert_eq!(template, "/orders/{orderId}/items/{itemId}");

    assert!(resolver.find_path_item("/orders/1/items").is_err());
    assert!(resolver.find_path_item("/orders/1/items/2/extra").is_err());
    assert!(resolver.find_path_item("/orders/1/2/items/3").is_err());
}

#[test]
fn test_query_string_is_ignored() {
    let spec = spec();
    let resolved = OperationResolver::new(&spec)
        .resolve(
            Direction::Response,
            &Target::operation("/orders/9/items/3?expand=true", "get").status(200),
        )
        .unwrap()
        .unwrap();
    assert_eq!(resolved.location, "GET /orders/{orderId}/items/{itemId} 200");
}

#[test]
fn test_status_range_fallback() {
    let spec = spec();
    let resolved = OperationResolver::new(&spec)
        .resolve(Direction::Response, &Target::operation("/orders", "POST").status(503))
        .unwrap()
        .unwrap();

    assert_eq!(resolved.location, "POST /orders 5XX");
    assert_eq!(resolved.schema, &Value::from(json!({"type": "string"})));
}

#[test]
fn test_path_not_found_lists_available_paths() {
    let spec = spec();
    let err = OperationResolver::new(&spec)
        .resolve(Direction::Request, &Target::operation("/customers", "get"))
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "no path matches '/customers' (available paths: /orders, /orders/{orderId}/items/{itemId})"
    );
}

#[test]
fn test_method_not_found_lists_allowed_methods() {
    let spec = spec();
    let err = OperationResolver::new(&spec)
        .resolve(Direction::Request, &Target::operation("/orders", "DELETE"))
        .unwrap_err();

    assert_eq!(
        err,
        ResolveError::MethodNotFound {
            path: "/orders".to_string(),
            method: "delete".to_string(),
            allowed: vec!["get".to_string(), "post".to_string()],
        }
    );
}

#[test]
fn test_status_not_found_without_default() {
    let spec = spec();
    let err = OperationResolver::new(&spec)
        .resolve(Direction::Response, &Target::operation("/orders", "get").status(404))
        .unwrap_err();

    assert!(matches!(err, ResolveError::StatusNotFound { status: 404, .. }));
    assert!(err.to_string().contains("available: 200"));
}
