use super::super::dto::{ChatRequestBody, ChatResponseBody, ErrorResponse};
use super::super::state::ServerState;
use crate::application::conversation::{ChatError, ConversationOutcome};
use crate::constants::{EMPTY_MESSAGE_ERROR, INVALID_BODY_ERROR};
use crate::domain::ConversationHistory;
use crate::infrastructure::model::ModelClient;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

type ErrorReply = (StatusCode, Json<ErrorResponse>);

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Resposta final do modelo e histórico estendido", body = ChatResponseBody),
        (status = 400, description = "Mensagem vazia ou histórico inválido", body = ErrorResponse),
        (status = 429, description = "Cota da API do modelo excedida", body = ErrorResponse),
        (status = 500, description = "Falha no provedor do modelo", body = ErrorResponse),
        (status = 504, description = "Tempo limite excedido", body = ErrorResponse)
    )
)]
pub async fn chat_handler<M: ModelClient>(
    State(state): State<Arc<ServerState<M>>>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatResponseBody>, ErrorReply> {
    let request_id = Uuid::new_v4();
    let span = info_span!("chat", %request_id);
    handle_chat(state, payload).instrument(span).await
}

async fn handle_chat<M: ModelClient>(
    state: Arc<ServerState<M>>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatResponseBody>, ErrorReply> {
    let Json(body) = payload.map_err(|rejection| {
        warn!(error = %rejection, "Rejecting /chat request with unreadable body");
        reply(&ChatError::Validation(INVALID_BODY_ERROR.to_string()))
    })?;

    let (message, history) = validate(body).map_err(|error| {
        warn!(%error, "Rejecting invalid /chat request");
        reply(&error)
    })?;

    info!(
        history_len = history.len(),
        message_chars = message.chars().count(),
        "Received /chat request"
    );

    let limit = state.request_timeout();
    let outcome = match timeout(limit, state.conversation().run(&message, history)).await {
        Ok(result) => result,
        Err(_) => Err(ChatError::Timeout(limit)),
    };

    match outcome {
        Ok(ConversationOutcome {
            response,
            history,
            tool_calls,
        }) => {
            info!(tool_calls, history_len = history.len(), "Chat request completed");
            Ok(Json(ChatResponseBody { response, history }))
        }
        Err(error) => {
            error!(%error, kind = ?error.kind(), "Chat request failed");
            Err(reply(&error))
        }
    }
}

/// Checks the message first so an empty message never costs a history parse.
/// Only the emptiness check trims; the message is forwarded as sent.
fn validate(body: ChatRequestBody) -> Result<(String, ConversationHistory), ChatError> {
    let message = body
        .message
        .filter(|message| !message.trim().is_empty())
        .ok_or_else(|| ChatError::Validation(EMPTY_MESSAGE_ERROR.to_string()))?;

    let history = match body.history {
        None => ConversationHistory::new(),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ChatError::Validation(format!("Histórico inválido: {e}")))?,
    };

    Ok((message, history))
}

fn reply(error: &ChatError) -> ErrorReply {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: error.user_message(),
        }),
    )
}
