//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: route lookup, dispatch and access
//! logging.

use crate::config::AppState;
use crate::handler::guests;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::RouteHandler;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::USER_AGENT;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Never fails: unmatched requests get the default 404 and handler errors
/// are already folded into responses.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _) = req.into_parts();

    // Routes match the request target as sent, query string included
    let target = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path(), |pq| pq.as_str());

    let response = route_request(&parts.method, target, &state).await;

    if state.config.logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            parts.method.to_string(),
            target.to_string(),
        );
        entry.http_version = AccessLogEntry::version_label(parts.version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Look up the route table and dispatch, falling back to 404
async fn route_request(method: &Method, target: &str, state: &AppState) -> Response<Full<Bytes>> {
    let server_name = state.config.http.server_name.as_str();

    match state.routes.lookup(method, target) {
        Some(RouteHandler::Greeting) => {
            http::build_text_response(&state.config.routes.greeting, server_name)
        }
        Some(RouteHandler::GuestList) => guests::serve_guest_list(&state.store, server_name).await,
        Some(RouteHandler::Guest(index)) => {
            guests::serve_guest(&state.store, index, server_name).await
        }
        None => http::build_404_response(server_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::StatusCode;

    struct Fixture {
        _dir: tempfile::TempDir,
        guests_file: std::path::PathBuf,
        state: Arc<AppState>,
    }

    fn fixture(contents: Option<&str>) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let guests_file = dir.path().join("guests.json");
        if let Some(contents) = contents {
            std::fs::write(&guests_file, contents).unwrap();
        }

        let config_path = dir.path().join("config");
        let mut cfg = Config::load_from(config_path.to_str().unwrap(), None).unwrap();
        cfg.store.guests_file = guests_file.to_string_lossy().into_owned();
        cfg.logging.access_log = false;

        Fixture {
            _dir: dir,
            guests_file,
            state: Arc::new(AppState::new(&cfg)),
        }
    }

    async fn send(
        state: &Arc<AppState>,
        method: &str,
        target: &str,
    ) -> (StatusCode, String, Bytes) {
        let req = Request::builder()
            .method(method)
            .uri(target)
            .body(())
            .unwrap();
        let resp = handle_request(req, Arc::clone(state), "127.0.0.1:5000".parse().unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_greeting() {
        let fx = fixture(None);
        let (status, content_type, body) = send(&fx.state, "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/plain");
        assert_eq!(body, "Hello world this is my first server");
    }

    #[tokio::test]
    async fn test_guest_list_is_verbatim() {
        let fx = fixture(Some(r#"["Mary","Don"]"#));
        let (status, content_type, body) = send(&fx.state, "GET", "/guests").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(body, r#"["Mary","Don"]"#);
    }

    #[tokio::test]
    async fn test_guest_list_is_idempotent() {
        let fx = fixture(Some("[\"Mary\", \"Don\"]\n"));
        let (_, _, first) = send(&fx.state, "GET", "/guests").await;
        let (_, _, second) = send(&fx.state, "GET", "/guests").await;
        assert_eq!(first, second);
        assert_eq!(first, "[\"Mary\", \"Don\"]\n");
    }

    #[tokio::test]
    async fn test_single_guests() {
        let fx = fixture(Some(r#"["Mary","Don"]"#));

        let (status, content_type, body) = send(&fx.state, "GET", "/guests/0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(body, r#""Mary""#);

        let (status, _, body) = send(&fx.state, "GET", "/guests/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#""Don""#);
    }

    #[tokio::test]
    async fn test_index_out_of_range_is_404() {
        let fx = fixture(Some(r#"["Mary"]"#));
        let (status, content_type, body) = send(&fx.state, "GET", "/guests/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type, "text/plain");
        assert_eq!(body, "Not found");
    }

    #[tokio::test]
    async fn test_configured_index_beyond_list_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let guests_file = dir.path().join("guests.json");
        std::fs::write(&guests_file, r#"["Mary","Don"]"#).unwrap();

        let mut cfg = Config::load_from(dir.path().join("config").to_str().unwrap(), None).unwrap();
        cfg.store.guests_file = guests_file.to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        cfg.routes.guest_indices = vec![0, 1, 5];
        let state = Arc::new(AppState::new(&cfg));

        let (status, _, body) = send(&state, "GET", "/guests/5").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Not found");
    }

    #[tokio::test]
    async fn test_missing_file_is_500_without_details() {
        let fx = fixture(None);
        for target in ["/guests", "/guests/0"] {
            let (status, content_type, body) = send(&fx.state, "GET", target).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(content_type, "text/plain");
            assert_eq!(body, "Internal Server Error");
        }
        let path = fx.guests_file.to_string_lossy().into_owned();
        let (_, _, body) = send(&fx.state, "GET", "/guests").await;
        assert!(!String::from_utf8_lossy(&body).contains(&path));
    }

    #[tokio::test]
    async fn test_malformed_file_is_500() {
        let fx = fixture(Some("not json"));
        let (status, _, body) = send(&fx.state, "GET", "/guests").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");

        let (status, _, _) = send(&fx.state, "GET", "/guests/0").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::load_from(dir.path().join("config").to_str().unwrap(), None).unwrap();
        // A directory exists but cannot be read as a file
        cfg.store.guests_file = dir.path().to_string_lossy().into_owned();
        cfg.logging.access_log = false;
        let state = Arc::new(AppState::new(&cfg));

        for target in ["/guests", "/guests/0"] {
            let (status, content_type, body) = send(&state, "GET", target).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{target}");
            assert_eq!(content_type, "text/plain");
            assert_eq!(body, "Internal Server Error");
        }
    }

    #[tokio::test]
    async fn test_unmatched_requests_are_404() {
        let fx = fixture(Some(r#"["Mary","Don"]"#));
        let cases = [
            ("GET", "/cats"),
            ("GET", "/guests/"),
            ("GET", "/guests/2"),
            ("GET", "/guests?limit=1"),
            ("POST", "/guests"),
            ("DELETE", "/guests/0"),
            ("HEAD", "/"),
            ("get", "/guests"),
        ];
        for (method, target) in cases {
            let (status, content_type, body) = send(&fx.state, method, target).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {target}");
            assert_eq!(content_type, "text/plain");
            assert_eq!(body, "Not found");
        }
    }

    #[tokio::test]
    async fn test_file_changes_are_visible_immediately() {
        let fx = fixture(Some(r#"["Mary"]"#));
        let (status, _, _) = send(&fx.state, "GET", "/guests/1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        std::fs::write(&fx.guests_file, r#"["Mary","Don"]"#).unwrap();
        let (status, _, body) = send(&fx.state, "GET", "/guests/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#""Don""#);
    }
}
