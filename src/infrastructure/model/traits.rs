//! Model traits

use super::types::{ModelError, ModelRequest, ModelTurn};
use async_trait::async_trait;

/// A hosted model that can continue a conversation and request tool calls.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Get the client ID
    fn id(&self) -> &str;

    /// Produce the next model turn for the given session state.
    async fn generate(&self, request: ModelRequest<'_>) -> Result<ModelTurn, ModelError>;
}
