use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::core::models::ImageUpload;
use crate::errors::AlertError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a serde_json::Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// The request's `origin` header, if the event carries one.
pub fn request_origin(payload: &Value) -> Option<&str> {
    payload
        .get("headers")
        .and_then(|headers| get_header_value(headers, "origin"))
}

/// HTTP method from either a REST API (v1) or HTTP API (v2) proxy event.
pub fn request_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["httpMethod"]).or_else(|| v_str(payload, &["requestContext", "http", "method"]))
}

pub fn is_preflight(payload: &Value) -> bool {
    request_method(payload).is_some_and(|m| m.eq_ignore_ascii_case("OPTIONS"))
}

/// Raw JSON bytes of the request body.
///
/// The web client base64-encodes its JSON itself, so the body is always
/// decoded. API Gateway's `isBase64Encoded` flag is `false` for such text
/// bodies and is ignored.
pub fn decode_body(payload: &Value) -> Result<Vec<u8>, AlertError> {
    let Some(body) = payload.get("body").and_then(Value::as_str) else {
        return Err(AlertError::DecodingError("missing body".to_string()));
    };

    decode_base64(body)
}

/// Pulls the image bytes out of the decoded JSON body.
///
/// Everything up to the last comma is treated as a data URI prefix and
/// dropped; a bare base64 string is accepted as-is.
pub fn parse_image_upload(json_body: &[u8]) -> Result<Vec<u8>, AlertError> {
    let upload: ImageUpload = serde_json::from_slice(json_body)?;
    let encoded = upload.image.rsplit(',').next().unwrap_or_default();
    let bytes = decode_base64(encoded)?;
    if bytes.is_empty() {
        return Err(AlertError::DecodingError("image payload is empty".to_string()));
    }
    Ok(bytes)
}

/// Runs both decoding stages: envelope body, then the embedded image.
pub fn extract_image(payload: &Value) -> Result<Vec<u8>, AlertError> {
    let json_body = decode_body(payload)?;
    parse_image_upload(&json_body)
}

fn decode_base64(input: &str) -> Result<Vec<u8>, AlertError> {
    let compact: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}
