//! Gemini client implementation

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::ModelConfig;
use crate::domain::ToolCallRequest;
use crate::domain::message::WireFunctionCall;
use crate::infrastructure::model::traits::ModelClient;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelTurn};

const PROVIDER_ID: &str = "gemini";

/// Categories blocked at medium probability and above.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Finish reasons that mean the candidate was withheld by content filtering.
const BLOCKING_FINISH_REASONS: [&str; 4] = ["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

/// Gemini client for Google AI
#[derive(Clone)]
pub struct GeminiClient {
    base: HttpClientBase,
    api_path: String,
    model: String,
}

impl GeminiClient {
    pub fn from_config(config: &ModelConfig) -> Result<Self, ModelError> {
        Ok(Self {
            base: HttpClientBase::new(
                PROVIDER_ID.to_string(),
                config.endpoint.clone(),
                Some(config.api_key.clone()),
                config.timeout,
            )?,
            api_path: config.api_path.clone(),
            model: config.model.clone(),
        })
    }

    fn build_model_url(&self) -> String {
        self.base.build_url(&format!(
            "{}/{}:generateContent",
            self.api_path.trim_matches('/'),
            self.model
        ))
    }

    fn build_payload(request: &ModelRequest<'_>) -> Value {
        let safety_settings: Vec<Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({"category": category, "threshold": SAFETY_THRESHOLD}))
            .collect();

        let mut payload = json!({
            "contents": request.history,
            "generationConfig": {
                "maxOutputTokens": request.generation.max_output_tokens,
                "temperature": request.generation.temperature,
            },
            "safetySettings": safety_settings,
        });

        if !request.tools.is_empty() {
            payload["tools"] = json!([{ "functionDeclarations": request.tools }]);
        }

        if let Some(system) = request.system_instruction {
            payload["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        payload
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn id(&self) -> &str {
        &self.base.id
    }

    async fn generate(&self, request: ModelRequest<'_>) -> Result<ModelTurn, ModelError> {
        let url = self.build_model_url();
        let payload = Self::build_payload(&request);

        info!(
            provider = self.base.id.as_str(),
            model = self.model.as_str(),
            messages = request.history.len(),
            tools = request.tools.len(),
            "Sending request to Gemini"
        );

        let response: GenerateContentResponse =
            self.base.post_with_query_key(&url, &payload).await?;
        debug!("Received response from Gemini");

        interpret_response(response)
    }
}

fn interpret_response(response: GenerateContentResponse) -> Result<ModelTurn, ModelError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(feedback) = response.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return Err(ModelError::safety_blocked(
                    PROVIDER_ID,
                    describe_block(&reason, &feedback.safety_ratings),
                ));
            }
        }
        return Err(ModelError::invalid_response(
            PROVIDER_ID,
            "response contained no candidates",
        ));
    };

    let mut text = String::new();
    let mut calls = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if part.thought {
            continue;
        }
        if let Some(call) = part.function_call {
            calls.push(ToolCallRequest::new(call.name, call.args));
        } else if let Some(fragment) = part.text {
            text.push_str(&fragment);
        }
    }

    let turn = ModelTurn::from_parts(text, calls);
    if turn == ModelTurn::Empty {
        if let Some(reason) = candidate
            .finish_reason
            .as_deref()
            .filter(|reason| BLOCKING_FINISH_REASONS.contains(reason))
        {
            return Err(ModelError::safety_blocked(
                PROVIDER_ID,
                describe_block(reason, &candidate.safety_ratings),
            ));
        }
    }
    Ok(turn)
}

fn describe_block(reason: &str, ratings: &[SafetyRating]) -> String {
    let flagged: Vec<String> = ratings
        .iter()
        .filter(|rating| rating.blocked || rating.is_elevated())
        .map(|rating| match rating.probability.as_deref() {
            Some(probability) => format!("{} ({probability})", rating.category),
            None => rating.category.clone(),
        })
        .collect();
    if flagged.is_empty() {
        reason.to_string()
    } else {
        format!("{reason}: {}", flagged.join(", "))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<SafetyRating>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    function_call: Option<WireFunctionCall>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<SafetyRating>,
}

#[derive(Deserialize)]
struct SafetyRating {
    category: String,
    probability: Option<String>,
    #[serde(default)]
    blocked: bool,
}

impl SafetyRating {
    fn is_elevated(&self) -> bool {
        matches!(self.probability.as_deref(), Some("MEDIUM") | Some("HIGH"))
    }
}
