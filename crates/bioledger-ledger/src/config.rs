use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::pow::MAX_DIFFICULTY;

/// Leading zero hex characters required of a sealed block by default.
pub const DEFAULT_DIFFICULTY: u32 = 4;

/// Which block answers a lookup when an (identity, credential type) pair has
/// been registered more than once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Scan from genesis forward; the oldest registration answers.
    #[default]
    FirstWins,
    /// Scan from the tail backward; the newest registration answers.
    LatestWins,
}

/// Process-wide chain configuration, fixed at chain construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Proof-of-work difficulty applied to every appended block.
    pub difficulty: u32,
    /// Re-registration lookup semantics.
    pub lookup: LookupPolicy,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            lookup: LookupPolicy::default(),
        }
    }
}

impl ChainConfig {
    /// Default configuration at the given difficulty.
    pub fn with_difficulty(difficulty: u32) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    /// Reject difficulties no digest can satisfy.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.difficulty > MAX_DIFFICULTY {
            return Err(LedgerError::InvalidDifficulty {
                difficulty: self.difficulty,
                max: MAX_DIFFICULTY,
            });
        }
        Ok(())
    }
}
