//! Response builders for the API Gateway proxy integration.
//!
//! Every response the browser can see carries the CORS headers so the
//! front end's AJAX call is able to read it.

use serde_json::{Map, Value, json};

use crate::core::models::AnomalyResult;
use crate::errors::AlertError;

pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "OPTIONS,POST,GET";

// ============================================================================
// Headers
// ============================================================================

/// CORS headers echoing `origin` verbatim.
///
/// Without a known origin only the allow-headers/methods pair is returned.
#[must_use]
pub fn cors_headers(origin: Option<&str>) -> Value {
    let mut headers = Map::new();
    if let Some(origin) = origin {
        headers.insert(
            "Access-Control-Allow-Origin".to_string(),
            Value::String(origin.to_string()),
        );
    }
    headers.insert(
        "Access-Control-Allow-Headers".to_string(),
        Value::String(ALLOW_HEADERS.to_string()),
    );
    headers.insert(
        "Access-Control-Allow-Methods".to_string(),
        Value::String(ALLOW_METHODS.to_string()),
    );
    Value::Object(headers)
}

// ============================================================================
// Response Builders
// ============================================================================

/// Returns a 200 OK response carrying the classification result.
#[must_use]
pub fn ok_result(origin: &str, result: &AnomalyResult) -> Value {
    let body = serde_json::to_string(result).unwrap_or_else(|_| "{}".to_string());
    json!({
        "statusCode": 200,
        "headers": cors_headers(Some(origin)),
        "body": body
    })
}

/// Returns an empty 200 for CORS preflight requests.
#[must_use]
pub fn preflight(origin: Option<&str>) -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(origin),
        "body": ""
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, origin: Option<&str>, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": cors_headers(origin),
        "body": json!({ "error": message }).to_string()
    })
}

/// Maps a failed step to its error response.
#[must_use]
pub fn from_error(error: &AlertError, origin: Option<&str>) -> Value {
    err_response(error.status_code(), origin, &error.to_string())
}
