/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("chain corruption at index {index}: {reason}")]
    ChainCorruption { index: u64, reason: String },

    #[error("invalid block: {0}")]
    InvalidBlock(String),

    #[error("difficulty {difficulty} exceeds maximum of {max}")]
    InvalidDifficulty { difficulty: u32, max: u32 },

    #[error("chain lock poisoned")]
    LockPoisoned,
}
