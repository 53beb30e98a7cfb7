use crate::domain::{ConversationHistory, ToolDeclaration};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// `history` stays untyped here so that a malformed history is reported as
/// a validation error after the message check.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub history: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponseBody {
    pub response: String,
    #[schema(value_type = Vec<Object>)]
    pub history: ConversationHistory,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ToolListResponse {
    pub tools: Vec<ToolDeclaration>,
}
