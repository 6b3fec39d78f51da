use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ServerError, ServerResult};

/// Metadata written to the audit store for each registration.
///
/// Carries the digest, never the raw sample.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub identity: String,
    pub credential_type: String,
    pub digest: String,
    pub block_index: u64,
    pub block_hash: String,
}

/// Destination for registration audit records.
///
/// The core never reads these back.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record_registration(&self, record: &AuditRecord) -> ServerResult<()>;
}

/// Emits each record as a structured log event.
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record_registration(&self, record: &AuditRecord) -> ServerResult<()> {
        tracing::info!(
            target: "bioledger::audit",
            identity = %record.identity,
            credential_type = %record.credential_type,
            block_index = record.block_index,
            block_hash = %record.block_hash,
            "biometric registration recorded"
        );
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> ServerResult<Vec<AuditRecord>> {
        self.records
            .lock()
            .map(|r| r.clone())
            .map_err(|_| ServerError::Internal("audit sink lock poisoned".into()))
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record_registration(&self, record: &AuditRecord) -> ServerResult<()> {
        self.records
            .lock()
            .map_err(|_| ServerError::Internal("audit sink lock poisoned".into()))?
            .push(record.clone());
        Ok(())
    }
}
