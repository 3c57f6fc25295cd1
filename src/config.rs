use std::env;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_FILTER_ENV_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime settings. The CLI has no flags, so everything here comes from the
/// environment (optionally seeded from a `.env` file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the environment.
    pub fn load() -> Self {
        dotenv::dotenv().ok();
        Self::from_filter(env::var(LOG_FILTER_ENV_VAR).ok())
    }

    fn from_filter(filter: Option<String>) -> Self {
        match filter {
            Some(f) if !f.trim().is_empty() => Self { log_filter: f },
            _ => Self::default(),
        }
    }
}
