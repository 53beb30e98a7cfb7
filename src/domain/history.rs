use super::message::Message;
use super::tool::{ToolCallRequest, ToolCallResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("tool call '{name}' at position {index} has no matching tool result")]
    UnpairedToolCall { index: usize, name: String },
    #[error("tool result '{name}' at position {index} does not answer a preceding tool call")]
    OrphanToolResult { index: usize, name: String },
}

/// Ordered, append-only conversation log.
///
/// The only way to add a tool call is together with its result, so every
/// history built here keeps calls and results paired. Histories arriving from
/// the caller are checked against the same rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Message>", into = "Vec<Message>")]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Result<Self, HistoryError> {
        validate(&messages)?;
        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_user_text(&mut self, text: impl Into<String>) {
        self.messages.push(Message::UserText(text.into()));
    }

    pub fn push_model_text(&mut self, text: impl Into<String>) {
        self.messages.push(Message::ModelText(text.into()));
    }

    pub fn push_tool_exchange(&mut self, call: ToolCallRequest, result: ToolCallResult) {
        self.messages.push(Message::ModelToolCall(call));
        self.messages.push(Message::ToolResult(result));
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

fn validate(messages: &[Message]) -> Result<(), HistoryError> {
    let mut pending: Option<(usize, &str)> = None;
    for (index, message) in messages.iter().enumerate() {
        match (pending.take(), message) {
            (Some((_, expected)), Message::ToolResult(result)) if result.name == expected => {}
            (Some((call_index, name)), _) => {
                return Err(HistoryError::UnpairedToolCall {
                    index: call_index,
                    name: name.to_string(),
                });
            }
            (None, Message::ModelToolCall(call)) => pending = Some((index, call.name.as_str())),
            (None, Message::ToolResult(result)) => {
                return Err(HistoryError::OrphanToolResult {
                    index,
                    name: result.name.clone(),
                });
            }
            (None, _) => {}
        }
    }
    match pending {
        Some((index, name)) => Err(HistoryError::UnpairedToolCall {
            index,
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

impl TryFrom<Vec<Message>> for ConversationHistory {
    type Error = HistoryError;

    fn try_from(messages: Vec<Message>) -> Result<Self, Self::Error> {
        Self::from_messages(messages)
    }
}

impl From<ConversationHistory> for Vec<Message> {
    fn from(history: ConversationHistory) -> Self {
        history.messages
    }
}
