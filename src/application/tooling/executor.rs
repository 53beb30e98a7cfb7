use super::error::ToolError;
use super::registry::ToolRegistry;
use crate::domain::{ToolCallRequest, ToolCallResult};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs registry tools and folds every failure into an error result.
#[derive(Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn execute(&self, request: &ToolCallRequest) -> ToolCallResult {
        let Some(tool) = self.registry.get(&request.name) else {
            warn!(requested_tool = %request.name, "Unknown tool requested by model");
            let error = ToolError::UnknownTool(request.name.clone());
            return ToolCallResult::error(&request.name, error.user_message());
        };

        debug!(tool = %request.name, args = ?request.args, "Dispatching tool");
        match tool.invoke(request).await {
            Ok(payload) => {
                info!(tool = %request.name, success = true, "Tool executed");
                ToolCallResult::success(&request.name, payload)
            }
            Err(error) => {
                info!(tool = %request.name, success = false, %error, "Tool executed");
                ToolCallResult::error(&request.name, error.user_message())
            }
        }
    }
}
