//! Header finalization hook
//!
//! Runs on every response after the handler produced it and before hyper
//! writes the header block. This is the single place the cross-origin header
//! is added, so error pages, redirects and 304s carry it too.

use hyper::header::{HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, SERVER};
use hyper::Response;

use crate::logger::{self, LogTarget};

/// Allow any origin to read every response
pub const ALLOW_ANY_ORIGIN: &str = "*";

/// Finalize response headers: log, inject the CORS header, then apply defaults
///
/// `Date` is appended by hyper when the head is encoded; `Content-Length`
/// comes from the response builders.
pub fn finalize_headers<B>(
    response: &mut Response<B>,
    server_name: &str,
    lifecycle: &LogTarget,
) {
    logger::log_headers_sent(lifecycle);
    // insert replaces any existing value, so the header appears exactly once
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ANY_ORIGIN));
    apply_default_headers(response.headers_mut(), server_name);
}

fn apply_default_headers(headers: &mut HeaderMap, server_name: &str) {
    if headers.contains_key(SERVER) {
        return;
    }
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            headers.insert(SERVER, value);
        }
        Err(e) => logger::log_warning(&format!("Invalid server name '{server_name}': {e}")),
    }
}
