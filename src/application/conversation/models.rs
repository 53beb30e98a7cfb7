use crate::config::{GenerationConfig, ModelConfig};
use crate::domain::ConversationHistory;

/// Per-process settings of the conversation loop.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub system_instruction: Option<String>,
    pub generation: GenerationConfig,
    /// Tool round trips allowed in one turn before giving up.
    pub max_tool_steps: usize,
}

impl From<&ModelConfig> for LoopSettings {
    fn from(config: &ModelConfig) -> Self {
        Self {
            system_instruction: config.system_prompt.clone(),
            generation: config.generation,
            max_tool_steps: config.max_tool_steps,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversationOutcome {
    pub response: String,
    pub history: ConversationHistory,
    pub tool_calls: usize,
}
