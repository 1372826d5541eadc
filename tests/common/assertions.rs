//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert a `{success: true, message}` response and return the message
pub fn assert_success(response: &TestResponse) -> String {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["success"], true, "Expected success. Body: {json}");
    json["message"]
        .as_str()
        .expect("Expected message string")
        .to_string()
}

/// Assert a JSON error response with the given status
pub fn assert_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}. Full response: {}",
        expected.as_u16(),
        serde_json::to_string_pretty(&json).unwrap()
    );
    json["error"]
        .as_str()
        .expect("Expected error string")
        .to_string()
}

/// Assert a file is a 320x300 1-bit printer BMP
pub fn assert_printer_bmp(bytes: &[u8]) {
    assert_eq!(bytes.len(), 12062, "BMP size");
    assert_eq!(&bytes[0..2], b"BM", "BMP signature");
    assert_eq!(bytes[28], 1, "bits per pixel");
    assert_eq!(u32::from_le_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]), 320);
    assert_eq!(u32::from_le_bytes([bytes[22], bytes[23], bytes[24], bytes[25]]), 300);
}

/// Count occurrences of `needle` in `haystack`
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
