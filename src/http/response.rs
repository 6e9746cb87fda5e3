//! HTTP response building module
//!
//! Builders for the handful of responses this server sends. They never panic:
//! a builder failure is logged and replaced by a fallback response that keeps
//! status, body, content type and length.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde_json::Value;

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";

const NOT_FOUND_BODY: &str = "Not found";
const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// Build a response with explicit status, content type and body
pub fn build_response(
    status: StatusCode,
    content_type: &str,
    body: Bytes,
    server_name: &str,
) -> Response<Full<Bytes>> {
    let content_length = body.len();

    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Server", server_name)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut fallback = Response::new(Full::new(body));
            *fallback.status_mut() = status;
            let headers = fallback.headers_mut();
            if let Ok(value) = HeaderValue::from_str(content_type) {
                headers.insert(CONTENT_TYPE, value);
            }
            headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
            fallback
        })
}

/// Build 200 plain-text response
pub fn build_text_response(text: &str, server_name: &str) -> Response<Full<Bytes>> {
    build_response(
        StatusCode::OK,
        TEXT_PLAIN,
        Bytes::copy_from_slice(text.as_bytes()),
        server_name,
    )
}

/// Build 200 JSON response from already-encoded JSON text
pub fn build_json_response(json: Bytes, server_name: &str) -> Response<Full<Bytes>> {
    build_response(StatusCode::OK, APPLICATION_JSON, json, server_name)
}

/// Build 200 JSON response by serializing a value
pub fn build_json_value_response(value: &Value, server_name: &str) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(json) => build_json_response(Bytes::from(json), server_name),
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            build_500_response(server_name)
        }
    }
}

/// Build 404 Not Found response
pub fn build_404_response(server_name: &str) -> Response<Full<Bytes>> {
    build_response(
        StatusCode::NOT_FOUND,
        TEXT_PLAIN,
        Bytes::from_static(NOT_FOUND_BODY.as_bytes()),
        server_name,
    )
}

/// Build 500 Internal Server Error response
///
/// The body is always the same generic text; causes go to the error log.
pub fn build_500_response(server_name: &str) -> Response<Full<Bytes>> {
    build_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        TEXT_PLAIN,
        Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()),
        server_name,
    )
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::json;

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_text_response() {
        let resp = build_text_response("hello", "test/1.0");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(resp.headers()["content-length"], "5");
        assert_eq!(resp.headers()["server"], "test/1.0");
        assert_eq!(body_of(resp).await, "hello");
    }

    #[tokio::test]
    async fn test_json_response_is_untouched() {
        let resp = build_json_response(Bytes::from_static(b"[\"Mary\", \"Don\"]\n"), "test/1.0");
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(body_of(resp).await, "[\"Mary\", \"Don\"]\n");
    }

    #[tokio::test]
    async fn test_json_value_response() {
        let resp = build_json_value_response(&json!("Mary"), "test/1.0");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_of(resp).await, "\"Mary\"");
    }

    #[tokio::test]
    async fn test_error_responses() {
        let resp = build_404_response("test/1.0");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(body_of(resp).await, "Not found");

        let resp = build_500_response("test/1.0");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(body_of(resp).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_fallback_keeps_error_content_type() {
        let resp = build_404_response("bad\r\nname");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(resp.headers()["content-length"], "9");
        assert_eq!(body_of(resp).await, "Not found");
    }

    #[tokio::test]
    async fn test_invalid_header_value_falls_back() {
        let resp = build_text_response("hello", "bad\nname");
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get("server").is_none());
        assert_eq!(resp.headers()["content-type"], "text/plain");
        assert_eq!(resp.headers()["content-length"], "5");
        assert_eq!(body_of(resp).await, "hello");
    }
}
