//! Conditional request module
//!
//! `Last-Modified` formatting and `If-Modified-Since` evaluation.

use chrono::{DateTime, Timelike, Utc};
use std::fs::Metadata;

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP date
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format(HTTP_DATE).to_string()
}

/// Parse an HTTP date header value; `None` if malformed
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// File modification time truncated to whole seconds (HTTP date resolution)
pub fn last_modified(metadata: &Metadata) -> Option<DateTime<Utc>> {
    let modified = DateTime::<Utc>::from(metadata.modified().ok()?);
    modified.with_nanosecond(0)
}

/// Whether a GET for a resource modified at `last_modified` may be answered
/// with 304.
///
/// `If-None-Match` takes precedence over `If-Modified-Since`; since no entity
/// tags are issued, its presence disables the date check.
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    last_modified: Option<DateTime<Utc>>,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let (Some(since), Some(modified)) = (if_modified_since.and_then(parse_http_date), last_modified)
    else {
        return false;
    };
    modified <= since
}
