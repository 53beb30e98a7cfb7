use super::super::dto::ResetResponse;
use crate::constants::RESET_ACKNOWLEDGEMENT;
use axum::Json;
use tracing::info;

/// History lives on the client, so there is nothing to clear server side.
#[utoipa::path(
    post,
    path = "/reset",
    tag = "chat",
    responses(
        (status = 200, description = "Confirmação de nova conversa", body = ResetResponse)
    )
)]
pub async fn reset_handler() -> Json<ResetResponse> {
    info!("Received /reset request");
    Json(ResetResponse {
        message: RESET_ACKNOWLEDGEMENT.to_string(),
    })
}
