use super::error::ToolError;
use super::registry::Tool;
use crate::config::WeatherConfig;
use crate::domain::{ParameterSchema, ParameterType, ToolCallRequest, ToolDeclaration};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

pub const WEATHER_TOOL_NAME: &str = "getWeather";

/// Current conditions from OpenWeatherMap.
pub struct WeatherTool {
    declaration: ToolDeclaration,
    http: Client,
    config: WeatherConfig,
}

impl WeatherTool {
    pub fn new(config: WeatherConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let parameters = ParameterSchema::new().required(
            "location",
            ParameterType::String,
            "A cidade e, opcionalmente, o código do país (ex: 'Curitiba, BR', 'London, UK', 'Tokyo').",
        );
        Ok(Self {
            declaration: ToolDeclaration::new(
                WEATHER_TOOL_NAME,
                "Obtém a previsão do tempo atual para uma cidade específica. Use quando o usuário perguntar sobre o clima ou temperatura em algum lugar.",
                parameters,
            ),
            http,
            config,
        })
    }

    async fn fetch(&self, api_key: &str, location: &str) -> Result<CurrentWeather, ToolError> {
        let upstream = |reason: String| ToolError::Upstream {
            location: location.to_string(),
            reason,
        };

        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("q", location),
                ("appid", api_key),
                ("units", self.config.units.as_str()),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| upstream(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ToolError::LocationNotFound {
                location: location.to_string(),
            }),
            status if !status.is_success() => Err(upstream(format!("HTTP {}", status.as_u16()))),
            _ => response
                .json::<CurrentWeather>()
                .await
                .map_err(|e| upstream(e.to_string())),
        }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn declaration(&self) -> &ToolDeclaration {
        &self.declaration
    }

    async fn invoke(&self, request: &ToolCallRequest) -> Result<Map<String, Value>, ToolError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!(tool = WEATHER_TOOL_NAME, "Weather API key is not configured");
            return Err(ToolError::MissingCredential {
                tool: WEATHER_TOOL_NAME.to_string(),
            });
        };
        let Some(location) = request.str_arg("location") else {
            return Err(ToolError::MissingLocation {
                tool: WEATHER_TOOL_NAME.to_string(),
            });
        };

        debug!(%location, "Requesting current weather");
        let weather = self.fetch(api_key, location).await.inspect_err(|error| {
            warn!(%location, %error, "Weather lookup failed");
        })?;

        let description = weather
            .weather
            .into_iter()
            .map(|condition| condition.description)
            .find(|description| !description.trim().is_empty())
            .ok_or_else(|| ToolError::Upstream {
                location: location.to_string(),
                reason: "response has no weather description".to_string(),
            })?;

        info!(%location, resolved = %weather.name, "Weather lookup succeeded");
        let mut payload = Map::new();
        payload.insert("location".into(), Value::String(weather.name));
        payload.insert("temperature".into(), json!(weather.main.temp));
        payload.insert("description".into(), Value::String(description));
        payload.insert(
            "country".into(),
            Value::String(weather.sys.country.unwrap_or_default()),
        );
        Ok(payload)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
    #[serde(default)]
    sys: SystemInfo,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct SystemInfo {
    country: Option<String>,
}
