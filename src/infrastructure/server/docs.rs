use super::dto::{ChatRequestBody, ChatResponseBody, ErrorResponse, ResetResponse, ToolListResponse};
use super::routes;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::chat::chat_handler,
        routes::reset::reset_handler,
        routes::tools::tools_handler
    ),
    components(
        schemas(
            ChatRequestBody,
            ChatResponseBody,
            ErrorResponse,
            ResetResponse,
            ToolListResponse
        )
    ),
    tags(
        (name = "chat", description = "Conversa com o modelo e suas ferramentas"),
        (name = "tools", description = "Ferramentas declaradas ao modelo")
    )
)]
pub(super) struct ApiDoc;
