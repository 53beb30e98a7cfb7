pub mod history;
pub mod message;
pub mod tool;

pub use history::{ConversationHistory, HistoryError};
pub use message::{Message, MessageFormatError, MessageRole, WireMessage, WirePart};
pub use tool::{
    ParameterSchema, ParameterSpec, ParameterType, ToolCallRequest, ToolCallResult,
    ToolDeclaration, ToolOutcome,
};
