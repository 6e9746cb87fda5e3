//! Guest resource handlers
//!
//! Turns store results into responses. Store failures are logged with their
//! cause and answered with a generic 500; nothing about the file reaches the
//! client.

use crate::http;
use crate::logger;
use crate::store::{GuestStore, StoreError};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Serve the whole guest list verbatim
pub async fn serve_guest_list(store: &GuestStore, server_name: &str) -> Response<Full<Bytes>> {
    match store.load_all().await {
        Ok(json) => http::build_json_response(json, server_name),
        Err(e) => store_failure(store, &e, server_name),
    }
}

/// Serve a single guest; out-of-range indices are 404
pub async fn serve_guest(
    store: &GuestStore,
    index: usize,
    server_name: &str,
) -> Response<Full<Bytes>> {
    match store.load_at(index).await {
        Ok(Some(guest)) => http::build_json_value_response(&guest, server_name),
        Ok(None) => {
            logger::log_debug(&format!("Guest index {index} is out of range"));
            http::build_404_response(server_name)
        }
        Err(e) => store_failure(store, &e, server_name),
    }
}

fn store_failure(store: &GuestStore, err: &StoreError, server_name: &str) -> Response<Full<Bytes>> {
    logger::log_error(&format!("{} ({})", err, store.path().display()));
    http::build_500_response(server_name)
}
