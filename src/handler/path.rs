//! Request path translation
//!
//! Maps a raw request path onto a location relative to the served root.
//! Normalization is purely lexical, so `..` can never climb above the root;
//! symlink escapes are caught later by the canonical containment check.

use std::path::PathBuf;

/// Request path translated for filesystem lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    /// Path relative to the served root (empty for the root itself)
    pub relative: PathBuf,
    /// Whether the request path ended with `/`
    pub trailing_slash: bool,
    /// Percent-decoded request path, used as the listing title
    pub display: String,
}

/// Translate a request path; `None` if it cannot name a file
pub fn translate_path(raw_path: &str) -> Option<RequestTarget> {
    let raw_path = raw_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let trailing_slash = raw_path.trim_end().ends_with('/');

    let decoded = urlencoding::decode(raw_path).ok()?;
    if decoded.contains('\0') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            // A segment carrying a separator or drive prefix never names a child
            #[cfg(windows)]
            s if s.contains(['\\', ':']) => {}
            s => segments.push(s),
        }
    }

    Some(RequestTarget {
        relative: segments.iter().collect(),
        trailing_slash,
        display: decoded.into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_plain_path() {
        let target = translate_path("/css/site.css").unwrap();
        assert_eq!(target.relative, Path::new("css/site.css"));
        assert!(!target.trailing_slash);
    }

    #[test]
    fn test_root() {
        let target = translate_path("/").unwrap();
        assert_eq!(target.relative, PathBuf::new());
        assert!(target.trailing_slash);
        assert_eq!(target.display, "/");
    }

    #[test]
    fn test_percent_decoding() {
        let target = translate_path("/my%20docs/r%C3%A9sum%C3%A9.txt").unwrap();
        assert_eq!(target.relative, Path::new("my docs/résumé.txt"));
        assert_eq!(target.display, "/my docs/résumé.txt");
    }

    #[test]
    fn test_query_and_fragment_ignored() {
        let target = translate_path("/index.html?v=3#top").unwrap();
        assert_eq!(target.relative, Path::new("index.html"));
    }

    #[test]
    fn test_parent_segments_cannot_escape_root() {
        let target = translate_path("/../../etc/passwd").unwrap();
        assert_eq!(target.relative, Path::new("etc/passwd"));

        let target = translate_path("/a/b/../../../c").unwrap();
        assert_eq!(target.relative, Path::new("c"));

        let target = translate_path("/%2e%2e/%2E%2E/secret").unwrap();
        assert_eq!(target.relative, Path::new("secret"));
    }

    #[test]
    fn test_empty_and_dot_segments_dropped() {
        let target = translate_path("//a/./b//").unwrap();
        assert_eq!(target.relative, Path::new("a/b"));
        assert!(target.trailing_slash);
    }

    #[test]
    fn test_rejects_nul_and_invalid_utf8() {
        assert!(translate_path("/a%00b").is_none());
        assert!(translate_path("/%FF%FE").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_backslash_is_part_of_the_name() {
        let target = translate_path("/docs/a%5Cb.txt").unwrap();
        assert_eq!(target.relative, Path::new("docs/a\\b.txt"));
        assert_eq!(target.relative.components().count(), 2);
    }
}
