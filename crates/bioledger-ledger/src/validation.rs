use serde::Serialize;

use crate::block::{Block, GENESIS_PREVIOUS_HASH};
use crate::error::LedgerError;

/// Result of a full chain audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub block_count: u64,
    pub hashes_valid: bool,
    pub links_valid: bool,
    pub sequence_monotonic: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Convert the first violation into [`LedgerError::ChainCorruption`].
    pub fn into_result(self) -> Result<(), LedgerError> {
        match self.violations.into_iter().next() {
            None => Ok(()),
            Some(v) => Err(LedgerError::ChainCorruption {
                index: v.index,
                reason: v.description,
            }),
        }
    }
}

/// A specific integrity violation detected during an audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    IndexGap,
    HashMismatch,
    BrokenLink,
    GenesisLink,
}

/// Non-short-circuit chain auditor.
///
/// Unlike [`crate::Chain::validate`], which stops at the first failure, an
/// audit visits every block and records every violation it finds.
pub struct ChainValidator;

impl ChainValidator {
    pub fn audit(blocks: &[Block]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut hashes_valid = true;
        let mut links_valid = true;
        let mut sequence_monotonic = true;

        for (position, block) in blocks.iter().enumerate() {
            let position = position as u64;

            if block.index() != position {
                sequence_monotonic = false;
                violations.push(Violation {
                    index: position,
                    kind: ViolationKind::IndexGap,
                    description: format!("expected index {position}, found {}", block.index()),
                });
            }

            if position == 0 {
                if block.previous_hash() != GENESIS_PREVIOUS_HASH {
                    links_valid = false;
                    violations.push(Violation {
                        index: 0,
                        kind: ViolationKind::GenesisLink,
                        description: format!(
                            "genesis previous hash must be \"{GENESIS_PREVIOUS_HASH}\""
                        ),
                    });
                }
                continue;
            }

            if !block.is_consistent() {
                hashes_valid = false;
                violations.push(Violation {
                    index: position,
                    kind: ViolationKind::HashMismatch,
                    description: "stored hash does not match recomputed content hash".into(),
                });
            }

            let previous = &blocks[position as usize - 1];
            if block.previous_hash() != previous.hash() {
                links_valid = false;
                violations.push(Violation {
                    index: position,
                    kind: ViolationKind::BrokenLink,
                    description: "previous hash does not match prior block".into(),
                });
            }
        }

        if !violations.is_empty() {
            tracing::warn!(
                violations = violations.len(),
                blocks = blocks.len(),
                "chain audit found violations"
            );
        }

        ValidationReport {
            block_count: blocks.len() as u64,
            hashes_valid,
            links_valid,
            sequence_monotonic,
            violations,
        }
    }
}
