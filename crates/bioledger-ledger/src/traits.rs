use crate::block::Block;
use crate::error::LedgerError;
use crate::validation::ValidationReport;

/// Write boundary for chain append operations.
pub trait ChainWriter: Send + Sync {
    /// Build, seal and append a block; returns the appended block.
    fn append(
        &self,
        identity: &str,
        credential_type: &str,
        fingerprint_digest: &str,
    ) -> Result<Block, LedgerError>;
}

/// Read boundary for chain query and validation operations.
pub trait ChainReader: Send + Sync {
    fn latest(&self) -> Result<Block, LedgerError>;

    fn block_count(&self) -> Result<usize, LedgerError>;

    fn lookup(&self, identity: &str, credential_type: &str)
        -> Result<Option<String>, LedgerError>;

    fn validate(&self) -> Result<bool, LedgerError>;

    fn audit(&self) -> Result<ValidationReport, LedgerError>;

    fn snapshot(&self) -> Result<Vec<Block>, LedgerError>;
}
