use super::app::{AppConfig, GenerationConfig, ModelConfig, ServerConfig, WeatherConfig};
use super::error::ConfigError;
use crate::constants::*;
use dotenvy::{dotenv, from_filename};
use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info, warn};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(super) struct RawConfig {
    pub server: RawServer,
    pub model: RawModel,
    pub weather: RawWeather,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(super) struct RawServer {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(super) struct RawModel {
    pub endpoint: Option<String>,
    pub api_path: Option<String>,
    pub name: Option<String>,
    /// Name of the environment variable holding the key.
    pub api_key_env: Option<String>,
    pub system_prompt: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub max_tool_steps: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub(super) struct RawWeather {
    pub endpoint: Option<String>,
    pub api_key_env: Option<String>,
    pub units: Option<String>,
    pub lang: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Ensures environment variables are loaded from config/.env (then ./.env)
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename(ENV_PATH);
        let _ = dotenv();
    });
}

/// Load and validate configuration from a file path.
///
/// An explicit path must exist; the default path is optional and falls back
/// to built-in defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let raw = match path {
        Some(path) => read_config(path)?,
        None => {
            let default_path = Path::new(CONFIG_PATH);
            match read_config(default_path) {
                Err(ConfigError::NotFound { .. }) => {
                    info!(
                        path = %default_path.display(),
                        "No configuration file found, using defaults"
                    );
                    RawConfig::default()
                }
                other => other?,
            }
        }
    };
    validate_and_build(raw, |key| env::var(key).ok())
}

pub(super) fn read_config(path: &Path) -> Result<RawConfig, ConfigError> {
    debug!(path = %path.display(), "Reading server configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a secret from the environment, treating blank values as unset.
fn resolve_secret<F>(lookup: &F, env_var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(env_var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(super) fn validate_and_build<F>(raw: RawConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let port = match lookup(PORT_ENV) {
        Some(value) => value
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort {
                value,
                source_name: PORT_ENV.to_string(),
            })?,
        None => raw.server.port.unwrap_or(DEFAULT_PORT),
    };

    let model_key_env = raw
        .model
        .api_key_env
        .unwrap_or_else(|| GEMINI_API_KEY_ENV.to_string());
    let api_key = resolve_secret(&lookup, &model_key_env).ok_or(
        ConfigError::MissingModelApiKey {
            env_var: model_key_env.clone(),
        },
    )?;

    let generation = GenerationConfig {
        max_output_tokens: raw
            .model
            .max_output_tokens
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        temperature: raw.model.temperature.unwrap_or(DEFAULT_TEMPERATURE),
    };
    if generation.max_output_tokens == 0 {
        return Err(ConfigError::ZeroValue {
            field: "model.max_output_tokens",
        });
    }
    if !(0.0..=2.0).contains(&generation.temperature) {
        return Err(ConfigError::InvalidTemperature(generation.temperature));
    }

    let max_tool_steps = raw.model.max_tool_steps.unwrap_or(DEFAULT_MAX_TOOL_STEPS);
    if max_tool_steps == 0 {
        return Err(ConfigError::ZeroValue {
            field: "model.max_tool_steps",
        });
    }

    let weather_key_env = raw
        .weather
        .api_key_env
        .unwrap_or_else(|| WEATHER_API_KEY_ENV.to_string());
    let weather_key = resolve_secret(&lookup, &weather_key_env);
    if weather_key.is_none() {
        warn!(
            env_var = weather_key_env.as_str(),
            "Weather API key is not set; the weather tool will report an error"
        );
    }

    let system_prompt = match raw.model.system_prompt {
        Some(prompt) if prompt.trim().is_empty() => None,
        Some(prompt) => Some(prompt),
        None => Some(DEFAULT_SYSTEM_PROMPT.to_string()),
    };

    Ok(AppConfig {
        server: ServerConfig {
            host: raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            cors_origins: raw.server.cors_origins,
            request_timeout: seconds_or(
                raw.server.request_timeout_secs,
                DEFAULT_REQUEST_TIMEOUT,
                "server.request_timeout_secs",
            )?,
        },
        model: ModelConfig {
            endpoint: raw
                .model
                .endpoint
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
            api_path: raw
                .model
                .api_path
                .unwrap_or_else(|| DEFAULT_GEMINI_API_PATH.to_string()),
            model: raw.model.name.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            system_prompt,
            generation,
            max_tool_steps,
            timeout: seconds_or(
                raw.model.timeout_secs,
                DEFAULT_MODEL_TIMEOUT,
                "model.timeout_secs",
            )?,
        },
        weather: WeatherConfig {
            endpoint: raw
                .weather
                .endpoint
                .unwrap_or_else(|| DEFAULT_WEATHER_ENDPOINT.to_string()),
            api_key: weather_key,
            units: raw
                .weather
                .units
                .unwrap_or_else(|| DEFAULT_WEATHER_UNITS.to_string()),
            lang: raw
                .weather
                .lang
                .unwrap_or_else(|| DEFAULT_WEATHER_LANG.to_string()),
            timeout: seconds_or(
                raw.weather.timeout_secs,
                DEFAULT_WEATHER_TIMEOUT,
                "weather.timeout_secs",
            )?,
        },
    })
}

fn seconds_or(
    value: Option<u64>,
    default: Duration,
    field: &'static str,
) -> Result<Duration, ConfigError> {
    match value {
        Some(0) => Err(ConfigError::ZeroValue { field }),
        Some(secs) => Ok(Duration::from_secs(secs)),
        None => Ok(default),
    }
}
