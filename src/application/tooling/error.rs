use thiserror::Error;

/// Tool-level failures. These never reach the HTTP caller: the executor turns
/// them into `{error: ...}` function responses for the model to react to.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool requested: {0}")]
    UnknownTool(String),
    #[error("tool '{tool}' has no API key configured")]
    MissingCredential { tool: String },
    #[error("tool '{tool}' was called without a location")]
    MissingLocation { tool: String },
    #[error("location '{location}' was not found by the weather provider")]
    LocationNotFound { location: String },
    #[error("weather lookup for '{location}' failed: {reason}")]
    Upstream { location: String, reason: String },
}

impl ToolError {
    /// Message placed in the function response, in the assistant's voice.
    pub fn user_message(&self) -> String {
        match self {
            ToolError::UnknownTool(name) => {
                format!("A função '{name}' é tão inútil quanto você e não existe.")
            }
            ToolError::MissingCredential { .. } => {
                "Chave da API de clima não configurada no servidor, humano insolente.".to_string()
            }
            ToolError::MissingLocation { .. } => {
                "Localização não especificada para a previsão do tempo, verme.".to_string()
            }
            ToolError::LocationNotFound { location } => format!(
                "Não encontrei essa cidade patética '{location}'. Tente novamente, se tiver capacidade."
            ),
            ToolError::Upstream { location, .. } => format!(
                "WRYYYYY! Falhei em obter o tempo para '{location}'. Talvez o lugar nem exista!"
            ),
        }
    }
}
