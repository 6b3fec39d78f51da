use std::sync::Arc;

use bioledger_gate::CredentialGateway;
use bioledger_ledger::SharedChain;

use crate::audit::{AuditSink, TracingAuditSink};
use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared application state passed to axum handlers.
///
/// Holds the process's single chain, created here and owned by whoever
/// builds the state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: CredentialGateway<SharedChain>,
    pub audit: Arc<dyn AuditSink>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a fresh chain from the configuration and log audits through
    /// tracing.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        Self::with_audit(config, Arc::new(TracingAuditSink))
    }

    pub fn with_audit(config: ServerConfig, audit: Arc<dyn AuditSink>) -> ServerResult<Self> {
        config.validate()?;
        let chain = SharedChain::with_config(config.chain.clone())?;
        Ok(Self {
            gateway: CredentialGateway::new(Arc::new(chain)),
            audit,
            config: Arc::new(config),
        })
    }

    pub fn chain(&self) -> &Arc<SharedChain> {
        self.gateway.chain()
    }
}
