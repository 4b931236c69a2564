//! Startup error type
//!
//! Every failure that stops the server before it starts serving. Per-request
//! failures never reach this type; they become HTTP error responses.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to open log file: {0}")]
    Log(#[source] io::Error),

    #[error("failed to build tokio runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("served root '{}' is not accessible: {source}", .path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not resolve {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("{host}:{port} did not resolve to any address")]
    NoAddress { host: String, port: u16 },

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_carries_system_error() {
        let err = ServerError::Bind {
            addr: "127.0.0.1:3000".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "Address already in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:3000"));
        assert!(msg.contains("Address already in use"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ServerError = config::ConfigError::Message("bad".to_string()).into();
        assert!(matches!(err, ServerError::Config(_)));
        assert_eq!(err.to_string(), "invalid configuration: bad");
    }
}
