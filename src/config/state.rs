// Application state module
// Immutable state shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;
use super::ROOT;
use crate::error::ServerError;
use crate::logger::{self, LogTarget};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical served root, resolved once at startup
    pub root: PathBuf,
    /// Where the startup banner and `Headers sent` lines go
    pub lifecycle: LogTarget,
}

impl AppState {
    /// Create `AppState` serving the working directory
    pub fn new(config: Config) -> Result<Self, ServerError> {
        Self::with_root(config, Path::new(ROOT))
    }

    /// Create `AppState` serving an explicit directory
    pub fn with_root(config: Config, root: &Path) -> Result<Self, ServerError> {
        let root = root.canonicalize().map_err(|source| ServerError::Root {
            path: root.to_path_buf(),
            source,
        })?;
        if !root.is_dir() {
            return Err(ServerError::Root {
                path: root,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        let lifecycle = logger::lifecycle_target(&config).map_err(ServerError::Log)?;
        Ok(Self {
            config,
            root,
            lifecycle,
        })
    }
}
