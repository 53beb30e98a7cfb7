use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("model API key is not set - export {env_var} or add it to config/.env")]
    MissingModelApiKey { env_var: String },

    #[error("invalid port '{value}' in {source_name}")]
    InvalidPort { value: String, source_name: String },

    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("'{field}' must be greater than zero")]
    ZeroValue { field: &'static str },
}
