use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use bioledger_gate::GatewayError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("ledger error: {0}")]
    Ledger(#[from] bioledger_ledger::LedgerError),

    #[error("rate limit exceeded: maximum {max_requests} requests per {window_secs} seconds")]
    RateLimited { max_requests: usize, window_secs: u64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Gateway(GatewayError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Gateway(GatewayError::NotRegistered { .. }) => StatusCode::NOT_FOUND,
            Self::Gateway(GatewayError::Mismatch) => StatusCode::UNAUTHORIZED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client.
    fn detail(&self) -> String {
        match self {
            Self::Gateway(GatewayError::InvalidInput(reason)) => {
                format!("Invalid input data: {reason}")
            }
            Self::Gateway(GatewayError::NotRegistered { .. }) => "Biometric not registered".into(),
            Self::Gateway(GatewayError::Mismatch) => "Biometric mismatch".into(),
            Self::RateLimited { .. } => self.to_string(),
            _ => "Internal server error".into(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}
