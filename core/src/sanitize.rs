//! Turn raw transport output into an `ApiResult<Value>`.
//!
//! # Design
//! HTTP status codes are not consulted: the backend reports failures inside
//! the payload as `{"error": {"code": .., "message": ..}}`, and that envelope
//! is the only business-level signal. A transport failure always wins over
//! any payload that came with it.

use serde_json::Value;

use crate::error::ApiError;
use crate::result::{capture, ApiResult};

/// Classify one transport outcome.
///
/// 1. A transport error is returned unchanged.
/// 2. A missing or empty payload is an empty-body error (code 1001).
/// 3. A payload that is not JSON is a malformed-body error.
/// 4. Otherwise the parsed tree goes through [`sanitize_error`].
pub fn sanitize(data: Option<&[u8]>, transport_error: Option<ApiError>) -> ApiResult<Value> {
    if let Some(err) = transport_error {
        return Err(err);
    }
    let data = match data {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(ApiError::empty_body()),
    };
    let json = capture(|| serde_json::from_slice::<Value>(data))?;
    sanitize_error(json)
}

/// Fail with the payload's embedded `error` object, if it has one.
///
/// A `null` error counts as absent. A non-numeric `code` becomes 0 (floats
/// are truncated) and a non-string `message` becomes empty.
pub fn sanitize_error(json: Value) -> ApiResult<Value> {
    let error = match json.get("error") {
        None | Some(Value::Null) => return Ok(json),
        Some(error) => error,
    };
    let code = match &error["code"] {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        _ => 0,
    };
    let message = error["message"].as_str().unwrap_or_default();
    Err(ApiError::business(code, message))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::error::{ErrorKind, CLIENT_DOMAIN, EMPTY_BODY_CODE};

    #[test]
    fn transport_error_wins_over_payload() {
        let transport = ApiError::transport(-1004, "could not connect");
        let result = sanitize(Some(br#"{"data":{}}"#), Some(transport.clone()));
        assert_eq!(result, Err(transport));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(&b""[..]))]
    fn missing_payload_is_empty_body(#[case] data: Option<&[u8]>) {
        let err = sanitize(data, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EmptyBody);
        assert_eq!(err.code, EMPTY_BODY_CODE);
    }

    #[test]
    fn invalid_json_is_malformed_body() {
        let err = sanitize(Some(b"<html>oops</html>"), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedBody);
    }

    #[test]
    fn payload_without_error_succeeds() {
        let result = sanitize(Some(br#"{"data":{"userId":"a"}}"#), None);
        assert_eq!(result, Ok(json!({"data": {"userId": "a"}})));
    }

    #[test]
    fn embedded_error_becomes_business_failure() {
        let body = br#"{"error":{"code":8787,"message":"This is a preset error."}}"#;
        let err = sanitize(Some(body), None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Business);
        assert_eq!(err.domain, CLIENT_DOMAIN);
        assert_eq!(err.code, 8787);
        assert_eq!(err.message, "This is a preset error.");
    }

    #[test]
    fn null_error_counts_as_absent() {
        let json = json!({"error": null, "data": {}});
        assert_eq!(sanitize_error(json.clone()), Ok(json));
    }

    #[rstest]
    #[case(json!({}), 0, "")]
    #[case(json!({"code": "12", "message": 5}), 0, "")]
    #[case(json!({"code": 42.9}), 42, "")]
    #[case(json!({"message": "only a message"}), 0, "only a message")]
    #[case(json!("just a string"), 0, "")]
    fn malformed_error_object_uses_defaults(
        #[case] error: Value,
        #[case] code: i64,
        #[case] message: &str,
    ) {
        let err = sanitize_error(json!({ "error": error })).unwrap_err();
        assert_eq!(err.code, code);
        assert_eq!(err.message, message);
    }
}
