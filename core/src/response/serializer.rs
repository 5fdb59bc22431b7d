use crate::response::types::{HttpResponse, ResponseBody};
use serde::Serialize;
use std::collections::HashMap;

const CONTENT_TYPE: &str = "Content-Type";

/// Renders a JSON value to bytes. `serde_json::Value` always serializes.
pub fn serialize_json_response(value: &serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

pub fn create_response(status: u16, body: ResponseBody) -> HttpResponse {
    let content_type = match &body {
        ResponseBody::Json(_) => Some("application/json"),
        ResponseBody::Text(_) => Some("text/plain"),
        ResponseBody::Empty => None,
    };

    let headers: HashMap<String, String> = content_type
        .map(|value| (CONTENT_TYPE.to_string(), value.to_string()))
        .into_iter()
        .collect();

    HttpResponse {
        status_code: status,
        headers,
        body,
    }
}

/// **JSON RESPONSE**
///
/// Accepts anything `Serialize`: a `json!` literal or a typed body struct.
/// A body that fails to serialize (e.g. a map with non-string keys) becomes a
/// 500 with an `{"error": ...}` body instead of a silently empty payload.
pub fn json_response<T: Serialize>(status: u16, body: T) -> HttpResponse {
    match serde_json::to_value(body) {
        Ok(value) => create_response(status, ResponseBody::Json(value)),
        Err(err) => {
            log::error!("Failed to serialize {} response body: {}", status, err);
            create_response(
                500,
                ResponseBody::Json(serde_json::json!({ "error": "response serialization failed" })),
            )
        }
    }
}

pub fn serialize_response_body(body: &ResponseBody) -> Vec<u8> {
    match body {
        ResponseBody::Empty => Vec::new(),
        ResponseBody::Json(value) => serialize_json_response(value),
        ResponseBody::Text(text) => text.as_bytes().to_vec(),
    }
}
