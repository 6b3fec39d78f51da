use std::sync::Arc;

use bioledger_crypto::ContentHasher;
use bioledger_ledger::{ChainReader, ChainWriter};
use serde::Serialize;

use crate::error::{GatewayError, GatewayResult};
use crate::request::CredentialRequest;
use crate::validation::{validate_pair, validate_request};

/// Outcome of a successful registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// SHA-256 hex digest of the registered sample.
    pub digest: String,
    /// Index of the block that anchors the digest.
    pub block_index: u64,
    /// Hash of that block.
    pub block_hash: String,
}

/// Registration state of an (identity, credential type) pair.
///
/// There is no transition back to `Unregistered`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    Unregistered,
    Registered,
}

/// Orchestrates hash-then-append on registration and hash-then-compare on
/// verification over a single shared chain.
pub struct CredentialGateway<C> {
    chain: Arc<C>,
}

impl<C> Clone for CredentialGateway<C> {
    fn clone(&self) -> Self {
        Self {
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<C: ChainReader + ChainWriter> CredentialGateway<C> {
    pub fn new(chain: Arc<C>) -> Self {
        Self { chain }
    }

    /// The chain this gateway writes to.
    pub fn chain(&self) -> &Arc<C> {
        &self.chain
    }

    /// Digest the sample and anchor it on the chain.
    ///
    /// Blocks while the new block is sealed. Registering a pair again adds a
    /// new block; which digest later verifications see depends on the
    /// chain's lookup policy.
    pub fn register(
        &self,
        identity: &str,
        sample: &str,
        credential_type: &str,
    ) -> GatewayResult<Registration> {
        self.register_request(&CredentialRequest::new(identity, sample, credential_type))
    }

    pub fn register_request(&self, request: &CredentialRequest) -> GatewayResult<Registration> {
        validate_request(request)?;
        let digest = ContentHasher::digest(request.sample.as_bytes());
        let block = self
            .chain
            .append(&request.identity, &request.credential_type, &digest)?;
        tracing::info!(
            credential_type = %request.credential_type,
            block_index = block.index(),
            "biometric registered"
        );
        Ok(Registration {
            digest,
            block_index: block.index(),
            block_hash: block.hash().to_string(),
        })
    }

    /// Check a fresh sample against the digest on record. Read-only.
    pub fn verify(&self, identity: &str, sample: &str, credential_type: &str) -> GatewayResult<()> {
        self.verify_request(&CredentialRequest::new(identity, sample, credential_type))
    }

    pub fn verify_request(&self, request: &CredentialRequest) -> GatewayResult<()> {
        validate_request(request)?;
        let stored = self
            .chain
            .lookup(&request.identity, &request.credential_type)?
            .ok_or_else(|| GatewayError::NotRegistered {
                identity: request.identity.clone(),
                credential_type: request.credential_type.clone(),
            })?;

        if ContentHasher::digest(request.sample.as_bytes()) != stored {
            tracing::warn!(credential_type = %request.credential_type, "biometric mismatch");
            return Err(GatewayError::Mismatch);
        }
        Ok(())
    }

    pub fn status(&self, identity: &str, credential_type: &str) -> GatewayResult<CredentialStatus> {
        validate_pair(identity, credential_type)?;
        Ok(match self.chain.lookup(identity, credential_type)? {
            Some(_) => CredentialStatus::Registered,
            None => CredentialStatus::Unregistered,
        })
    }

    /// Run the link-integrity check and surface a failure as
    /// [`GatewayError::ChainCorruption`].
    pub fn check_integrity(&self) -> GatewayResult<()> {
        if self.chain.validate()? {
            return Ok(());
        }
        self.chain.audit()?.into_result()?;
        Err(GatewayError::ChainCorruption {
            index: 0,
            reason: "link integrity check failed".into(),
        })
    }
}
