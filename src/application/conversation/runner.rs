use super::errors::ChatError;
use super::models::{ConversationOutcome, LoopSettings};
use crate::application::tooling::ToolExecutor;
use crate::constants::EMPTY_RESPONSE_FALLBACK;
use crate::domain::{ConversationHistory, ToolDeclaration};
use crate::infrastructure::model::{ModelClient, ModelRequest, ModelTurn};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives one user turn: model call, tool round trips, final text.
pub struct ConversationLoop<M: ModelClient> {
    model: Arc<M>,
    executor: ToolExecutor,
    declarations: Vec<ToolDeclaration>,
    settings: LoopSettings,
}

impl<M: ModelClient> ConversationLoop<M> {
    pub fn new(model: Arc<M>, executor: ToolExecutor, settings: LoopSettings) -> Self {
        let declarations = executor.registry().declarations();
        Self {
            model,
            executor,
            declarations,
            settings,
        }
    }

    pub fn declarations(&self) -> &[ToolDeclaration] {
        &self.declarations
    }

    /// Runs the turn to completion. `user_message` must already be validated
    /// as non-empty. Tool failures are answered to the model; only upstream
    /// failures and the tool-step cap end the turn with an error.
    pub async fn run(
        &self,
        user_message: &str,
        prior_history: ConversationHistory,
    ) -> Result<ConversationOutcome, ChatError> {
        let prior_len = prior_history.len();
        let mut history = prior_history;
        let mut tool_calls = 0usize;

        info!(
            model = self.model.id(),
            prior_messages = prior_len,
            "Conversation turn started"
        );
        history.push_user_text(user_message);
        let mut turn = self.generate(&history).await?;

        loop {
            match turn {
                ModelTurn::Text(text) if !text.trim().is_empty() => {
                    history.push_model_text(text.clone());
                    info!(
                        tool_calls,
                        appended = history.len() - prior_len,
                        "Model returned final response"
                    );
                    return Ok(ConversationOutcome {
                        response: text,
                        history,
                        tool_calls,
                    });
                }
                ModelTurn::ToolCalls(mut calls) if !calls.is_empty() => {
                    if tool_calls >= self.settings.max_tool_steps {
                        warn!(
                            limit = self.settings.max_tool_steps,
                            "Model exceeded max tool interactions"
                        );
                        return Err(ChatError::ToolLimitExceeded {
                            limit: self.settings.max_tool_steps,
                        });
                    }
                    tool_calls += 1;

                    let call = calls.remove(0);
                    let ignored: Vec<String> = calls.into_iter().map(|extra| extra.name).collect();
                    if !ignored.is_empty() {
                        warn!(
                            tool = %call.name,
                            ?ignored,
                            "Model requested several tools at once; only the first is executed"
                        );
                    }

                    info!(tool = %call.name, step = tool_calls, "Model requested tool execution");
                    let result = self.executor.execute(&call).await;
                    history.push_tool_exchange(call, result);
                    turn = self.generate(&history).await?;
                }
                ModelTurn::Text(_) | ModelTurn::ToolCalls(_) | ModelTurn::Empty => {
                    warn!("Model response had neither usable text nor a tool call; using fallback text");
                    history.push_model_text(EMPTY_RESPONSE_FALLBACK);
                    return Ok(ConversationOutcome {
                        response: EMPTY_RESPONSE_FALLBACK.to_string(),
                        history,
                        tool_calls,
                    });
                }
            }
        }
    }

    async fn generate(&self, history: &ConversationHistory) -> Result<ModelTurn, ChatError> {
        debug!(messages = history.len(), "Submitting turn to model");
        let request = ModelRequest {
            history,
            tools: &self.declarations,
            system_instruction: self.settings.system_instruction.as_deref(),
            generation: self.settings.generation,
        };
        Ok(self.model.generate(request).await?)
    }
}
