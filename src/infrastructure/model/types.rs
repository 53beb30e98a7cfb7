//! Model types - Request, Turn, and Error types

use crate::config::GenerationConfig;
use crate::domain::{ConversationHistory, ToolCallRequest, ToolDeclaration};
use thiserror::Error;

/// One generation request: the whole session so far plus its fixed settings.
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub history: &'a ConversationHistory,
    pub tools: &'a [ToolDeclaration],
    pub system_instruction: Option<&'a str>,
    pub generation: GenerationConfig,
}

/// What the model produced for one step of the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelTurn {
    /// Plain answer text, never blank.
    Text(String),
    /// One or more pending function calls, in the order the model listed them.
    ToolCalls(Vec<ToolCallRequest>),
    /// Neither text nor a function call.
    Empty,
}

impl ModelTurn {
    /// Builds a turn from raw parts, giving function calls precedence over text.
    pub fn from_parts(text: String, calls: Vec<ToolCallRequest>) -> Self {
        if !calls.is_empty() {
            ModelTurn::ToolCalls(calls)
        } else if text.trim().is_empty() {
            ModelTurn::Empty
        } else {
            ModelTurn::Text(text)
        }
    }
}

/// Model errors
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("provider '{provider}' requires an API key")]
    MissingApiKey { provider: String },
    #[error("network error calling provider '{provider}': {source}")]
    Network {
        provider: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("provider '{provider}' returned HTTP {status}: {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },
    #[error("provider '{provider}' blocked the request for safety reasons: {reason}")]
    SafetyBlocked { provider: String, reason: String },
    #[error("provider '{provider}' returned invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },
}

impl ModelError {
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }

    pub fn network(provider: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            provider: provider.into(),
            source,
        }
    }

    pub fn status(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn safety_blocked(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SafetyBlocked {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_response(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Upstream HTTP status, when the provider answered with one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ModelError::Status { status, .. } => Some(*status),
            ModelError::Network { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ModelError::Network { source, .. } if source.is_timeout())
    }
}
