use crate::infrastructure::model::ModelError;
use std::time::Duration;
use thiserror::Error;

/// Terminal failures of a chat request. Tool-level failures are not here:
/// they are fed back to the model and never end a turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("model requested more than {limit} tool calls in a single turn")]
    ToolLimitExceeded { limit: usize },
    #[error("conversation turn did not finish within {0:?}")]
    Timeout(Duration),
}

/// Client-facing classification of a [`ChatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    QuotaExceeded,
    SafetyBlocked,
    UpstreamProtocol,
    Timeout,
}

const QUOTA_STATUS: u16 = 429;
const INTERNAL_STATUS: u16 = 500;
const TIMEOUT_STATUS: u16 = 504;

impl ChatError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::Validation(_) => ErrorKind::Validation,
            ChatError::Timeout(_) => ErrorKind::Timeout,
            ChatError::ToolLimitExceeded { .. } => ErrorKind::UpstreamProtocol,
            ChatError::Model(error) if error.is_timeout() => ErrorKind::Timeout,
            ChatError::Model(ModelError::SafetyBlocked { .. }) => ErrorKind::SafetyBlocked,
            ChatError::Model(error) if error.upstream_status() == Some(QUOTA_STATUS) => {
                ErrorKind::QuotaExceeded
            }
            ChatError::Model(_) => ErrorKind::UpstreamProtocol,
        }
    }

    /// HTTP status for the response: the upstream status when there is one.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Timeout => TIMEOUT_STATUS,
            ErrorKind::QuotaExceeded => QUOTA_STATUS,
            ErrorKind::SafetyBlocked | ErrorKind::UpstreamProtocol => self
                .upstream_status()
                .filter(|status| (400..=599).contains(status))
                .unwrap_or(INTERNAL_STATUS),
        }
    }

    fn upstream_status(&self) -> Option<u16> {
        match self {
            ChatError::Model(error) => error.upstream_status(),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match (self.kind(), self) {
            (_, ChatError::Validation(message)) => message.clone(),
            (ErrorKind::Timeout, _) => {
                "ZA WARUDO! O tempo parou, e sua resposta também. Tente novamente, mortal."
                    .to_string()
            }
            (ErrorKind::QuotaExceeded, _) => "MUDA MUDA MUDA! Você excedeu minha generosidade \
                (e a cota da API do Google). Espere um pouco antes de me importunar novamente."
                .to_string(),
            (_, ChatError::Model(ModelError::SafetyBlocked { reason, .. })) => format!(
                "Hmpf. Sua solicitação foi bloqueada por motivos de segurança. Patético. Detalhes: {reason}"
            ),
            (_, ChatError::Model(ModelError::Status {
                status, message, ..
            })) => format!("Erro na API Gemini: {status} {message}. Que incompetência."),
            _ => "WRYYYYY! Algo deu terrivelmente errado, humano insignificante! \
                Minha paciência tem limites."
                .to_string(),
        }
    }
}
