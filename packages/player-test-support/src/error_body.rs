//! Error body test helpers
//!
//! Every failure the player reports is a JSON object with an `error` string
//! and, for response validation failures, a `details` object. These helpers
//! assert that contract without depending on player types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::test;
use serde::Deserialize;
use serde_json::Value;

/// Local mirror of the player's error body.
#[derive(Debug, Deserialize)]
struct ErrorBodyLike {
    error: String,
    #[serde(default)]
    details: Option<Value>,
}

/// Split a response into status, headers and parsed JSON body.
///
/// An empty body reads as `Value::Null`.
pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> (StatusCode, HeaderMap, Value) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    if body.is_empty() {
        return (status, headers, Value::Null);
    }
    let json = serde_json::from_slice(&body).expect("response body should be valid JSON");
    (status, headers, json)
}

fn parse_error_body(body: &Value) -> ErrorBodyLike {
    serde_json::from_value(body.clone()).expect("response body should be an error body")
}

/// Assert an error body with exactly `expected_error` and no `details`.
pub fn assert_error_body(body: &Value, expected_error: &str) {
    let parsed = parse_error_body(body);
    assert_eq!(parsed.error, expected_error);
    assert!(
        parsed.details.is_none(),
        "error body should not carry details: {body}"
    );
    assert_eq!(
        body.as_object().map(|o| o.len()),
        Some(1),
        "error body should only contain `error`: {body}"
    );
}

/// Assert an error body carrying validation `details` and return them.
pub fn assert_error_with_details(body: &Value, expected_error: &str) -> Value {
    let parsed = parse_error_body(body);
    assert_eq!(parsed.error, expected_error);
    let details = parsed
        .details
        .expect("validation error body should carry details");
    assert_eq!(details["name"], "ValidationError");
    assert!(
        details["issues"].as_array().is_some_and(|i| !i.is_empty()),
        "details should list at least one issue: {details}"
    );
    details
}

/// Assert the three permissive CORS headers are present.
pub fn assert_cors_headers(headers: &HeaderMap) {
    let expected = [
        ("access-control-allow-origin", "*"),
        ("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS"),
        ("access-control-allow-headers", "Content-Type, Authorization"),
    ];
    for (name, value) in expected {
        let actual = headers
            .get(name)
            .unwrap_or_else(|| panic!("response should include {name}"))
            .to_str()
            .expect("header should be valid UTF-8");
        assert_eq!(actual, value, "{name} has the wrong value");
    }
}
