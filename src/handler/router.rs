//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, path
//! translation and dispatch to static file serving.

use crate::config::AppState;
use crate::handler::{path, static_files};
use crate::http::{self, ResponseBody};
use crate::logger;
use hyper::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::{Method, Request, Response, StatusCode};

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
}

/// Main entry point for HTTP request handling
///
/// The body is never read, so any body type is accepted.
pub async fn handle_request<B>(req: &Request<B>, state: &AppState) -> Response<ResponseBody> {
    let method = req.method();
    let is_head = method == Method::HEAD;

    if let Some(resp) = check_http_method(method) {
        return resp;
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        query: req.uri().query(),
        is_head,
        if_modified_since: req
            .headers()
            .get(IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string),
        has_if_none_match: req.headers().contains_key(IF_NONE_MATCH),
    };

    let Some(target) = path::translate_path(ctx.path) else {
        return http::build_error_response(StatusCode::NOT_FOUND, Some("File not found"), is_head);
    };

    static_files::serve(&ctx, &target, state).await
}

/// Only GET and HEAD are served; everything else is 501
fn check_http_method(method: &Method) -> Option<Response<ResponseBody>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_error_response(
                StatusCode::NOT_IMPLEMENTED,
                Some(format!("Unsupported method ('{method}')").as_str()),
                false,
            ))
        }
    }
}
