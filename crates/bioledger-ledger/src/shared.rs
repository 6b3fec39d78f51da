use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::block::Block;
use crate::chain::Chain;
use crate::config::ChainConfig;
use crate::error::LedgerError;
use crate::traits::{ChainReader, ChainWriter};
use crate::validation::ValidationReport;

/// Process-wide chain handle for concurrent callers.
///
/// Appends hold the write lock for the whole build, seal and push sequence,
/// so two registrations can never claim the same index or previous hash.
/// Reads share the read lock and never observe a partially appended block.
pub struct SharedChain {
    inner: RwLock<Chain>,
}

impl SharedChain {
    pub fn new(chain: Chain) -> Self {
        Self {
            inner: RwLock::new(chain),
        }
    }

    pub fn with_config(config: ChainConfig) -> Result<Self, LedgerError> {
        Ok(Self::new(Chain::with_config(config)?))
    }

    /// Configuration of the wrapped chain.
    pub fn config(&self) -> Result<ChainConfig, LedgerError> {
        Ok(self.read()?.config().clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Chain>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Chain>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for SharedChain {
    fn default() -> Self {
        Self::new(Chain::new())
    }
}

impl ChainWriter for SharedChain {
    fn append(
        &self,
        identity: &str,
        credential_type: &str,
        fingerprint_digest: &str,
    ) -> Result<Block, LedgerError> {
        let mut chain = self.write()?;
        chain.append(identity, credential_type, fingerprint_digest)
    }
}

impl ChainReader for SharedChain {
    fn latest(&self) -> Result<Block, LedgerError> {
        Ok(self.read()?.latest().clone())
    }

    fn block_count(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.len())
    }

    fn lookup(
        &self,
        identity: &str,
        credential_type: &str,
    ) -> Result<Option<String>, LedgerError> {
        let chain = self.read()?;
        let digest = chain.lookup(identity, credential_type).map(str::to_owned);
        tracing::debug!(credential_type, found = digest.is_some(), "credential lookup");
        Ok(digest)
    }

    fn validate(&self) -> Result<bool, LedgerError> {
        Ok(self.read()?.validate())
    }

    fn audit(&self) -> Result<ValidationReport, LedgerError> {
        Ok(self.read()?.audit())
    }

    fn snapshot(&self) -> Result<Vec<Block>, LedgerError> {
        Ok(self.read()?.blocks().to_vec())
    }
}
