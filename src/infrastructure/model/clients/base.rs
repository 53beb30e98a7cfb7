//! Base HTTP client with shared logic

use crate::infrastructure::model::types::ModelError;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

/// Base HTTP client with shared functionality
#[derive(Clone)]
pub struct HttpClientBase {
    pub id: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub http: Client,
}

impl HttpClientBase {
    pub fn new(
        id: String,
        endpoint: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ModelError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::network(&id, e))?;
        Ok(Self {
            id,
            endpoint,
            api_key,
            http,
        })
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Post JSON with query param auth (for Gemini).
    ///
    /// Non-success statuses become [`ModelError::Status`] carrying the
    /// provider's own error message when the body has one.
    pub async fn post_with_query_key<Req, Res>(
        &self,
        url: &str,
        body: &Req,
    ) -> Result<Res, ModelError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        let api_key = self.require_api_key()?;

        let response = self
            .http
            .post(url)
            .query(&[("key", api_key)])
            .json(body)
            .send()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_error_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });
            warn!(
                provider = self.id.as_str(),
                status = status.as_u16(),
                %message,
                "Provider returned an error status"
            );
            return Err(ModelError::status(&self.id, status.as_u16(), message));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ModelError::network(&self.id, e))?;
        serde_json::from_str(&text)
            .map_err(|e| ModelError::invalid_response(&self.id, e.to_string()))
    }

    fn require_api_key(&self) -> Result<&str, ModelError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ModelError::missing_api_key(&self.id))
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Pulls `error.message` (or `error.status`) out of a Google-style error body.
fn extract_error_message(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope
        .error
        .message
        .or(envelope.error.status)
        .filter(|message| !message.trim().is_empty())
}
