use super::error::ConfigError;
use std::path::Path;
use std::time::Duration;

/// Application configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub weather: WeatherConfig,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Upper bound for one whole `/chat` turn, tool round trips included.
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Fixed sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub endpoint: String,
    pub api_path: String,
    pub model: String,
    pub api_key: String,
    pub system_prompt: Option<String>,
    pub generation: GenerationConfig,
    pub max_tool_steps: usize,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub endpoint: String,
    /// Absent key only disables the weather tool.
    pub api_key: Option<String>,
    pub units: String,
    pub lang: String,
    pub timeout: Duration,
}
