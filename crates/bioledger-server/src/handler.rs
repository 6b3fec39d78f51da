use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use bioledger_gate::{validate_request, CredentialRequest, CredentialStatus, GatewayError};
use bioledger_ledger::{Block, ChainReader, Violation};

use crate::audit::AuditRecord;
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub digest: String,
    pub block_index: u64,
    pub block_hash: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    /// First position that failed the integrity check.
    pub corrupt_at: Option<u64>,
    pub block_count: u64,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub user_id: String,
    pub biometric_type: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: CredentialStatus,
}

/// Run chain work off the async workers. Appends hold the write lock while
/// sealing, so even reads may wait on proof-of-work.
async fn run_blocking<T, F>(work: F) -> ServerResult<T>
where
    F: FnOnce() -> ServerResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
}

/// POST /register_biometric
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<CredentialRequest>,
) -> ServerResult<Json<RegisterResponse>> {
    validate_request(&request)?;

    let gateway = state.gateway.clone();
    let pending = request.clone();
    let registration =
        run_blocking(move || gateway.register_request(&pending).map_err(ServerError::from)).await?;

    // The block is already on the chain, so an audit failure is only logged.
    let record = AuditRecord {
        identity: request.identity,
        credential_type: request.credential_type,
        digest: registration.digest.clone(),
        block_index: registration.block_index,
        block_hash: registration.block_hash.clone(),
    };
    if let Err(err) = state.audit.record_registration(&record).await {
        tracing::error!(
            error = %err,
            block_index = record.block_index,
            "registration stored but audit record failed"
        );
    }

    Ok(Json(RegisterResponse {
        message: "Biometric registered successfully",
        digest: registration.digest,
        block_index: registration.block_index,
        block_hash: registration.block_hash,
    }))
}

/// POST /verify_biometric
pub async fn verify_handler(
    State(state): State<AppState>,
    Json(request): Json<CredentialRequest>,
) -> ServerResult<Json<VerifyResponse>> {
    let gateway = state.gateway.clone();
    run_blocking(move || gateway.verify_request(&request).map_err(ServerError::from)).await?;
    Ok(Json(VerifyResponse {
        status: "success",
        message: "Biometric verified successfully",
    }))
}

/// GET /validate
pub async fn validate_handler(
    State(state): State<AppState>,
) -> ServerResult<Json<ValidateResponse>> {
    let gateway = state.gateway.clone();
    let (integrity, report) = run_blocking(move || {
        let integrity = gateway.check_integrity();
        Ok((integrity, gateway.chain().audit()?))
    })
    .await?;

    let corrupt_at = match integrity {
        Ok(()) => None,
        Err(GatewayError::ChainCorruption { index, reason }) => {
            tracing::warn!(index, %reason, "chain integrity check failed");
            Some(index)
        }
        Err(err) => return Err(err.into()),
    };
    Ok(Json(ValidateResponse {
        valid: corrupt_at.is_none(),
        corrupt_at,
        block_count: report.block_count,
        violations: report.violations,
    }))
}

/// GET /status?user_id=..&biometric_type=..
pub async fn status_handler(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> ServerResult<Json<StatusResponse>> {
    let gateway = state.gateway.clone();
    let status = run_blocking(move || {
        gateway
            .status(&query.user_id, &query.biometric_type)
            .map_err(ServerError::from)
    })
    .await?;
    Ok(Json(StatusResponse { status }))
}

/// GET /chain
pub async fn chain_handler(State(state): State<AppState>) -> ServerResult<Json<Vec<Block>>> {
    let chain = state.chain().clone();
    let blocks = run_blocking(move || Ok(chain.snapshot()?)).await?;
    Ok(Json(blocks))
}

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// GET /
pub async fn info_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "title": state.config.title,
        "version": env!("CARGO_PKG_VERSION"),
        "difficulty": state.config.chain.difficulty,
        "status": "running",
    }))
}
