use super::super::dto::ToolListResponse;
use super::super::state::ServerState;
use crate::infrastructure::model::ModelClient;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses(
        (status = 200, description = "Ferramentas oferecidas ao modelo", body = ToolListResponse)
    )
)]
pub async fn tools_handler<M: ModelClient>(
    State(state): State<Arc<ServerState<M>>>,
) -> Json<ToolListResponse> {
    let tools = state.conversation().declarations().to_vec();
    debug!(tool_count = tools.len(), "Serving /tools request");
    Json(ToolListResponse { tools })
}
