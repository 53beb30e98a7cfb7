//! Conversation messages and their wire representation.
//!
//! Internally a message is one of four closed variants. On the wire (both to
//! the browser and to Gemini) it is the `{role, parts}` content shape.

use super::tool::{ToolCallRequest, ToolCallResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A single entry of a conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireMessage", into = "WireMessage")]
pub enum Message {
    /// Text typed by the user.
    UserText(String),
    /// Final (or intermediate) text produced by the model.
    ModelText(String),
    /// The model asked the host to run a tool.
    ModelToolCall(ToolCallRequest),
    /// The host's answer to the preceding tool call.
    ToolResult(ToolCallResult),
}

impl Message {
    pub fn role(&self) -> MessageRole {
        match self {
            Message::UserText(_) => MessageRole::User,
            Message::ModelText(_) | Message::ModelToolCall(_) => MessageRole::Model,
            Message::ToolResult(_) => MessageRole::Function,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
    Function,
}

impl MessageRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Model => "model",
            MessageRole::Function => "function",
        }
    }
}

/// Role-tagged content as exchanged with the browser and with Gemini.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: MessageRole,
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WirePart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: WireFunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: WireFunctionResponse,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionResponse {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub response: Map<String, Value>,
}

// Gemini sends `"args": null` for some zero-argument calls.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why a wire message could not be mapped onto a [`Message`] variant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageFormatError {
    #[error("message with role '{role}' has no parts")]
    NoParts { role: &'static str },
    #[error("message with role '{role}' mixes parts that cannot appear together")]
    MixedParts { role: &'static str },
    #[error("role '{role}' cannot carry a {part} part")]
    UnexpectedPart {
        role: &'static str,
        part: &'static str,
    },
}

impl WirePart {
    fn kind(&self) -> &'static str {
        match self {
            WirePart::Text { .. } => "text",
            WirePart::FunctionCall { .. } => "functionCall",
            WirePart::FunctionResponse { .. } => "functionResponse",
        }
    }
}

impl TryFrom<WireMessage> for Message {
    type Error = MessageFormatError;

    fn try_from(wire: WireMessage) -> Result<Self, Self::Error> {
        let role = wire.role.as_str();
        let mut parts = wire.parts;
        if parts.is_empty() {
            return Err(MessageFormatError::NoParts { role });
        }

        if parts.iter().all(|part| matches!(part, WirePart::Text { .. })) {
            let text = parts
                .into_iter()
                .filter_map(|part| match part {
                    WirePart::Text { text } => Some(text),
                    _ => None,
                })
                .collect::<String>();
            return match wire.role {
                MessageRole::User => Ok(Message::UserText(text)),
                MessageRole::Model => Ok(Message::ModelText(text)),
                MessageRole::Function => Err(MessageFormatError::UnexpectedPart {
                    role,
                    part: "text",
                }),
            };
        }

        if parts.len() > 1 {
            return Err(MessageFormatError::MixedParts { role });
        }

        match (wire.role, parts.remove(0)) {
            (MessageRole::Model, WirePart::FunctionCall { function_call }) => {
                Ok(Message::ModelToolCall(ToolCallRequest::new(
                    function_call.name,
                    function_call.args,
                )))
            }
            // Gemini's newer content format sends function responses as `user`.
            (
                MessageRole::Function | MessageRole::User,
                WirePart::FunctionResponse { function_response },
            ) => Ok(Message::ToolResult(ToolCallResult::from_response(
                function_response.name,
                function_response.response,
            ))),
            (_, part) => Err(MessageFormatError::UnexpectedPart {
                role,
                part: part.kind(),
            }),
        }
    }
}

impl From<Message> for WireMessage {
    fn from(message: Message) -> Self {
        let role = message.role();
        let part = match message {
            Message::UserText(text) | Message::ModelText(text) => WirePart::Text { text },
            Message::ModelToolCall(call) => WirePart::FunctionCall {
                function_call: WireFunctionCall {
                    name: call.name,
                    args: call.args,
                },
            },
            Message::ToolResult(result) => WirePart::FunctionResponse {
                function_response: WireFunctionResponse {
                    response: result.response_payload(),
                    name: result.name,
                },
            },
        };
        WireMessage {
            role,
            parts: vec![part],
        }
    }
}
