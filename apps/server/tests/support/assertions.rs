use anyhow::Context as _;
use axum::http::StatusCode;
use serde_json::Value;

/// Assert a status code, printing the body on mismatch
pub fn assert_status(actual: StatusCode, expected: StatusCode, body: &[u8]) {
    assert_eq!(
        actual,
        expected,
        "unexpected status; body: {}",
        String::from_utf8_lossy(body)
    );
}

pub fn parse_json(body: &[u8]) -> anyhow::Result<Value> {
    serde_json::from_slice(body).context("response body is JSON")
}

/// Assert the `{"error": code, "detail": ...}` error shape
pub fn assert_error_code(body: &[u8], code: &str) -> anyhow::Result<()> {
    let value = parse_json(body)?;
    assert_eq!(
        value.get("error").and_then(|v| v.as_str()),
        Some(code),
        "expected error code {code}, got {value}"
    );
    assert!(
        value.get("detail").and_then(|v| v.as_str()).is_some(),
        "error body carries a detail message"
    );
    Ok(())
}

pub fn id_of(value: &Value) -> anyhow::Result<i64> {
    value
        .get("id")
        .and_then(|v| v.as_i64())
        .context("response has numeric id")
}

/// Ids of a JSON array of records, in response order
pub fn ids_of(value: &Value) -> anyhow::Result<Vec<i64>> {
    value
        .as_array()
        .context("response is an array")?
        .iter()
        .map(id_of)
        .collect()
}
