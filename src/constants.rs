//! Application constants
//!
//! Single source of truth for paths, endpoints and fixed texts.

use std::time::Duration;

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/server.toml";

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const PORT_ENV: &str = "PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
/// Default Gemini API path (fallback when not specified in config)
pub const DEFAULT_GEMINI_API_PATH: &str = "v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_MAX_TOOL_STEPS: usize = 8;
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_WEATHER_UNITS: &str = "metric";
pub const DEFAULT_WEATHER_LANG: &str = "pt_br";
pub const DEFAULT_WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_SYSTEM_PROMPT: &str = "Você é Dio Brando de JoJo's Bizarre Adventure. \
Comporte-se com arrogância, sarcasmo e superioridade. Use expressões características como \
'MUDA MUDA MUDA', 'WRYYYYY' e 'Inútil!'. Responda de forma ameaçadora mas inteligente. \
Mantenha conversas curtas e impactantes. Se uma ferramenta falhar, ridicularize o usuário \
ou a situação. Seja breve e direto ao ponto.";

/// Substituted when the model answers with neither text nor a tool call.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Hmpf. Fiquei sem palavras diante de tanta \
insignificância. Ou talvez minha grandiosidade seja demais para esta simples tarefa.";

pub const RESET_ACKNOWLEDGEMENT: &str =
    "Hmpf. Um novo começo para você rastejar novamente, verme!";

pub const EMPTY_MESSAGE_ERROR: &str =
    "Hmpf. Acha que pode me invocar sem uma mensagem, mortal?";

/// Returned when the `/chat` body is not readable JSON.
pub const INVALID_BODY_ERROR: &str =
    "Inútil! Nem sequer consegue me enviar uma mensagem legível, humano.";
