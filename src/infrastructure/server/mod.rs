//! HTTP surface of the relay.
//!
//! `/chat` and `/reset` are the endpoints the browser frontend talks to;
//! `/tools` and the OpenAPI document are there for operators.

mod docs;
pub mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use error::ServerError;
pub use router::build_router;
pub use state::ServerState;

use crate::infrastructure::model::ModelClient;
use std::sync::Arc;

pub async fn serve<M>(
    state: Arc<ServerState<M>>,
    cors_origins: &[String],
    addr: &str,
) -> Result<(), ServerError>
where
    M: ModelClient + 'static,
{
    router::serve(state, cors_origins, addr).await
}
