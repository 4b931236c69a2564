//! Logger module
//!
//! Provides logging utilities for the server including:
//! - Lifecycle lines (startup banner, one line per response), stdout by default
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::LogTarget;

use crate::config::Config;

/// Line written every time a response header block is finalized
pub const HEADERS_SENT: &str = "Headers sent";

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.info_log_file.as_deref(),
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => eprintln!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Open the lifecycle target a server instance writes its banner and
/// per-response lines to
pub fn lifecycle_target(config: &Config) -> std::io::Result<LogTarget> {
    LogTarget::open(config.logging.info_log_file.as_deref(), LogTarget::Stdout)
}

pub fn log_serving(lifecycle: &LogTarget, url: &str) {
    lifecycle.write_line(&format!("Serving on {url}"));
}

pub fn log_headers_sent(lifecycle: &LogTarget) {
    lifecycle.write_line(HEADERS_SENT);
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("{signal} received, shutting down"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Report a fatal startup error; its message already embeds the system error
pub fn log_fatal(err: &dyn std::error::Error) {
    write_error(&format!("[FATAL] {err}"));
}
