//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from request
//! dispatch: content types, conditional requests, response builders and the
//! header finalization hook.

pub mod body;
pub mod conditional;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use body::ResponseBody;
pub use headers::finalize_headers;
pub use response::{
    build_304_response, build_error_response, build_file_response, build_html_response,
    build_redirect_response,
};
