// Configuration module entry point
// Loads configuration and holds the state shared by every connection

mod state;
mod types;

pub use state::AppState;
pub use types::Config;

/// Host the server binds and announces
pub const HOST: &str = "localhost";

/// Port the server binds and announces
pub const PORT: u16 = 3000;

/// Served root, resolved against the working directory at startup
pub const ROOT: &str = ".";

/// Config file looked up in the working directory (extension optional)
const CONFIG_FILE: &str = "corsserve";

/// Prefix for environment overrides, e.g. `CORSSERVE_LOGGING__ACCESS_LOG=false`
const ENV_PREFIX: &str = "CORSSERVE";

impl Config {
    /// Load configuration from `corsserve.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Load from a file plus an explicit variable map, or the process
    /// environment when `env` is `None`
    fn load_with_env(
        config_path: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.server.workers == Some(0) {
            return Err(config::ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if self.http.server_name.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "http.server_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// URL announced at startup
pub fn serving_url() -> String {
    format!("http://{HOST}:{PORT}")
}
