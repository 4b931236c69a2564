//! HTTP response building module
//!
//! Provides builders for every response the file server produces, decoupled
//! from request dispatch. `HEAD` variants keep all headers and drop the body.

use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use hyper::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED, LOCATION};
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use tokio::fs::File;

use super::body::{self, FileBody, ResponseBody};
use super::conditional::http_date;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Build 200 response streaming an opened file of `len` bytes
pub fn build_file_response(
    file: File,
    len: u64,
    content_type: &str,
    last_modified: Option<DateTime<Utc>>,
    is_head: bool,
) -> Response<ResponseBody> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, len);
    if let Some(modified) = last_modified {
        builder = builder.header(LAST_MODIFIED, http_date(modified));
    }

    let body = if is_head {
        body::empty()
    } else {
        FileBody::new(file, len).boxed()
    };
    finish(builder, body, "200")
}

/// Build 200 HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<ResponseBody> {
    let content_length = content.len();
    let builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length);

    let body = if is_head { body::empty() } else { body::full(content) };
    finish(builder, body, "HTML")
}

/// Build 301 response pointing a directory request at its slash-terminated form
pub fn build_redirect_response(location: &str) -> Response<ResponseBody> {
    let builder = Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0);
    finish(builder, body::empty(), "301")
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: Option<DateTime<Utc>>) -> Response<ResponseBody> {
    let mut builder = Response::builder().status(StatusCode::NOT_MODIFIED);
    if let Some(modified) = last_modified {
        builder = builder.header(LAST_MODIFIED, http_date(modified));
    }
    finish(builder, body::empty(), "304")
}

/// Build an HTML error page
///
/// `message` defaults to the status reason phrase.
pub fn build_error_response(
    status: StatusCode,
    message: Option<&str>,
    is_head: bool,
) -> Response<ResponseBody> {
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let message = message.unwrap_or(reason);
    let page = format!(
        "<!DOCTYPE HTML>\n\
         <html lang=\"en\">\n\
         \x20   <head>\n\
         \x20       <meta charset=\"utf-8\">\n\
         \x20       <title>Error response</title>\n\
         \x20   </head>\n\
         \x20   <body>\n\
         \x20       <h1>Error response</h1>\n\
         \x20       <p>Error code: {code}</p>\n\
         \x20       <p>Message: {message}.</p>\n\
         \x20       <p>Error code explanation: {code} - {explain}.</p>\n\
         \x20   </body>\n\
         </html>\n",
        code = status.as_u16(),
        message = escape_html(message),
        explain = explain(status),
    );

    let builder = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, ERROR_CONTENT_TYPE)
        .header(CONTENT_LENGTH, page.len())
        .header(CONNECTION, "close");

    let body = if is_head { body::empty() } else { body::full(page) };
    finish(builder, body, status.as_str())
}

/// Long description of an error status for error pages
fn explain(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad request syntax or unsupported method",
        StatusCode::FORBIDDEN => "Request forbidden -- authorization will not help",
        StatusCode::NOT_FOUND => "Nothing matches the given URI",
        StatusCode::INTERNAL_SERVER_ERROR => "Server got itself in trouble",
        StatusCode::NOT_IMPLEMENTED => "Server does not support this operation",
        other => other.canonical_reason().unwrap_or("Unknown status"),
    }
}

/// Escape text for inclusion in HTML element content
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn finish(builder: Builder, body: ResponseBody, label: &str) -> Response<ResponseBody> {
    builder.body(body).unwrap_or_else(|e| {
        log_build_error(label, &e);
        let mut fallback = Response::new(body::empty());
        *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        fallback
    })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(response: Response<ResponseBody>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn open_file(dir: &tempfile::TempDir, contents: &str) -> File {
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, contents).unwrap();
        File::open(&path).await.unwrap()
    }

    #[tokio::test]
    async fn test_file_response_streams_contents() {
        let dir = tempfile::tempdir().unwrap();
        let file = open_file(&dir, "hello").await;
        let response = build_file_response(file, 5, "text/plain", None, false);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(response.headers()[CONTENT_LENGTH], "5");
        assert_eq!(body_string(response).await, "hello");
    }

    #[tokio::test]
    async fn test_file_response_head_keeps_length() {
        let dir = tempfile::tempdir().unwrap();
        let file = open_file(&dir, "hello").await;
        let response = build_file_response(file, 5, "text/plain", None, true);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_LENGTH], "5");
        assert!(response.headers().get(LAST_MODIFIED).is_none());
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_error_response_page() {
        let response = build_error_response(StatusCode::NOT_FOUND, Some("File not found"), false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], ERROR_CONTENT_TYPE);
        assert_eq!(response.headers()[CONNECTION], "close");
        let body = body_string(response).await;
        assert!(body.contains("<p>Error code: 404</p>"));
        assert!(body.contains("<p>Message: File not found.</p>"));
        assert!(body.contains("404 - Nothing matches the given URI."));
    }

    #[tokio::test]
    async fn test_error_response_escapes_message() {
        let response =
            build_error_response(StatusCode::NOT_IMPLEMENTED, Some("Unsupported method ('<X>')"), false);
        let body = body_string(response).await;
        assert!(body.contains("Unsupported method ('&lt;X&gt;')"));
    }

    #[test]
    fn test_redirect_response() {
        let response = build_redirect_response("/docs/");
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[LOCATION], "/docs/");
        assert_eq!(response.headers()[CONTENT_LENGTH], "0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_html("plain \"quoted\""), "plain \"quoted\"");
    }
}
