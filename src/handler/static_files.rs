//! Static file serving module
//!
//! Resolves translated request paths inside the served root and produces
//! file, index, listing, redirect and error responses.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::path::RequestTarget;
use crate::handler::router::RequestContext;
use crate::http::{self, conditional, mime, ResponseBody};
use crate::logger;
use hyper::{Response, StatusCode};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve whatever the request path names inside the served root
pub async fn serve(
    ctx: &RequestContext<'_>,
    target: &RequestTarget,
    state: &AppState,
) -> Response<ResponseBody> {
    let candidate = state.root.join(&target.relative);
    let Some((resolved, metadata)) = resolve_within_root(&candidate, &state.root, ctx.path).await
    else {
        return not_found(ctx);
    };

    if metadata.is_dir() {
        if !target.trailing_slash {
            return http::build_redirect_response(&redirect_location(ctx));
        }
        return serve_directory(ctx, target, &resolved, state).await;
    }

    // Files never match a slash-terminated path; sockets, fifos and devices are not served
    if target.trailing_slash || !metadata.is_file() {
        return not_found(ctx);
    }

    serve_file(ctx, &resolved, &metadata).await
}

/// Serve the first index file present in `dir`, or a generated listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    target: &RequestTarget,
    dir: &Path,
    state: &AppState,
) -> Response<ResponseBody> {
    for index_file in &state.config.http.index_files {
        let candidate = dir.join(index_file);
        if let Some((index_path, metadata)) =
            resolve_within_root(&candidate, &state.root, ctx.path).await
        {
            if metadata.is_file() {
                return serve_file(ctx, &index_path, &metadata).await;
            }
        }
    }

    match listing::read_entries(dir).await {
        Ok(entries) => {
            let html = listing::render_listing(&target.display, &entries);
            http::build_html_response(html, ctx.is_head)
        }
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to list directory '{}': {}",
                dir.display(),
                e
            ));
            http::build_error_response(
                StatusCode::NOT_FOUND,
                Some("No permission to list directory"),
                ctx.is_head,
            )
        }
    }
}

/// Serve a regular file, honoring `If-Modified-Since`
async fn serve_file(
    ctx: &RequestContext<'_>,
    file_path: &Path,
    metadata: &Metadata,
) -> Response<ResponseBody> {
    let last_modified = conditional::last_modified(metadata);
    if conditional::is_not_modified(
        ctx.if_modified_since.as_deref(),
        ctx.has_if_none_match,
        last_modified,
    ) {
        return http::build_304_response(last_modified);
    }

    // Open failures become a 500; read errors after the head abort the connection
    let file = match fs::File::open(file_path).await {
        Ok(f) => f,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return http::build_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some("Error reading file"),
                ctx.is_head,
            );
        }
    };

    let content_type = mime::content_type_for(file_path);
    http::build_file_response(
        file,
        metadata.len(),
        content_type,
        last_modified,
        ctx.is_head,
    )
}

/// Canonicalize `candidate` and ensure it stays inside the served root
///
/// Returns `None` when the path does not exist or escapes the root.
async fn resolve_within_root(
    candidate: &Path,
    root: &Path,
    request_path: &str,
) -> Option<(PathBuf, Metadata)> {
    // File not found is common (404), no need to log
    let canonical = fs::canonicalize(candidate).await.ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        return None;
    }

    let metadata = fs::metadata(&canonical).await.ok()?;
    Some((canonical, metadata))
}

/// Location for a directory requested without its trailing slash
///
/// Leading slashes collapse to one so the target can never read as a
/// scheme-relative URL on another host.
fn redirect_location(ctx: &RequestContext<'_>) -> String {
    let path = ctx.path.trim_start_matches('/');
    match ctx.query {
        Some(query) => format!("/{path}/?{query}"),
        None => format!("/{path}/"),
    }
}

fn not_found(ctx: &RequestContext<'_>) -> Response<ResponseBody> {
    http::build_error_response(StatusCode::NOT_FOUND, Some("File not found"), ctx.is_head)
}
