// Shared fixtures: a scripted model and a fake OpenWeatherMap.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chat_relay::config::WeatherConfig;
use chat_relay::domain::ConversationHistory;
use chat_relay::infrastructure::model::{ModelClient, ModelError, ModelRequest, ModelTurn};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const WEATHER_KEY: &str = "test-weather-key";

/// Replays canned model turns and records every history it was sent.
pub struct ScriptedModel {
    responses: Mutex<Vec<Result<ModelTurn, ModelError>>>,
    histories: Mutex<Vec<ConversationHistory>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<ModelTurn, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses),
            histories: Mutex::new(Vec::new()),
        })
    }

    pub async fn calls(&self) -> usize {
        self.histories.lock().await.len()
    }

    pub async fn histories(&self) -> Vec<ConversationHistory> {
        self.histories.lock().await.clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: ModelRequest<'_>) -> Result<ModelTurn, ModelError> {
        self.histories.lock().await.push(request.history.clone());
        let mut responses = self.responses.lock().await;
        if responses.is_empty() {
            return Err(ModelError::invalid_response("scripted", "script exhausted"));
        }
        responses.remove(0)
    }
}

/// Spawns `app` on an ephemeral port and returns its address.
pub async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// Fake `data/2.5/weather`: knows Lisbon, 404s everything else, 401s a
/// wrong key.
pub async fn spawn_weather_api() -> SocketAddr {
    async fn weather(Query(params): Query<HashMap<String, String>>) -> Response {
        if params.get("appid").map(String::as_str) != Some(WEATHER_KEY) {
            return (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({"cod": 401, "message": "Invalid API key"})),
            )
                .into_response();
        }
        let city = params.get("q").map(String::as_str).unwrap_or_default();
        if !city.to_lowercase().starts_with("lisbon") {
            return (
                StatusCode::NOT_FOUND,
                axum::Json(json!({"cod": "404", "message": "city not found"})),
            )
                .into_response();
        }
        if params.get("units").map(String::as_str) != Some("metric")
            || params.get("lang").map(String::as_str) != Some("pt_br")
        {
            return StatusCode::BAD_REQUEST.into_response();
        }
        axum::Json(json!({
            "name": "Lisboa",
            "main": {"temp": 21.4, "humidity": 60},
            "weather": [{"main": "Clouds", "description": "nuvens dispersas"}],
            "sys": {"country": "PT"}
        }))
        .into_response()
    }

    spawn(Router::new().route("/data/2.5/weather", get(weather))).await
}

pub fn weather_config(addr: SocketAddr, api_key: Option<&str>) -> WeatherConfig {
    WeatherConfig {
        endpoint: format!("http://{addr}/data/2.5/weather"),
        api_key: api_key.map(str::to_string),
        units: "metric".into(),
        lang: "pt_br".into(),
        timeout: Duration::from_secs(5),
    }
}
