use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::infrastructure::model::ModelClient;
use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the application router. An empty origin list allows any origin.
pub fn build_router<M>(state: Arc<ServerState<M>>, cors_origins: &[String]) -> Router
where
    M: ModelClient + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .route("/chat", post(routes::chat::chat_handler::<M>))
        .route("/reset", post(routes::reset::reset_handler))
        .route("/tools", get(routes::tools::tools_handler::<M>))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(%origin, %error, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if allowed.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

pub(super) async fn serve<M>(
    state: Arc<ServerState<M>>,
    cors_origins: &[String],
    addr: &str,
) -> Result<(), ServerError>
where
    M: ModelClient + 'static,
{
    info!(%addr, "Binding REST server");
    let app = build_router(state, cors_origins);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;
    if let Ok(local) = listener.local_addr() {
        info!(addr = %local, "REST server ready to accept connections");
    }

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}
