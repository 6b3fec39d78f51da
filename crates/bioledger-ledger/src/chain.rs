use bioledger_crypto::HashChainVerifier;

use crate::block::{Block, GENESIS_PREVIOUS_HASH, GENESIS_SENTINEL};
use crate::config::{ChainConfig, LookupPolicy};
use crate::error::LedgerError;
use crate::validation::{ChainValidator, ValidationReport};

/// Genesis-anchored, append-only sequence of proof-of-work sealed blocks.
///
/// A chain always holds at least the genesis block. Blocks are only added at
/// the tail through [`Chain::append`] and are never mutated afterwards.
#[derive(Clone, Debug)]
pub struct Chain {
    blocks: Vec<Block>,
    config: ChainConfig,
}

impl Chain {
    /// A chain holding only genesis, at the default configuration.
    pub fn new() -> Self {
        Self {
            blocks: vec![Self::genesis()],
            config: ChainConfig::default(),
        }
    }

    /// A chain holding only genesis, at the given configuration.
    pub fn with_config(config: ChainConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            blocks: vec![Self::genesis()],
            config,
        })
    }

    /// The sentinel block at index 0. Genesis is not sealed.
    pub fn genesis() -> Block {
        Block::build(
            0,
            GENESIS_SENTINEL.into(),
            GENESIS_SENTINEL.into(),
            GENESIS_SENTINEL.into(),
            GENESIS_PREVIOUS_HASH.into(),
            crate::block::now_secs(),
        )
    }

    /// The tail block.
    pub fn latest(&self) -> &Block {
        // Non-empty from construction onward.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Build, seal and append a block for the given credential digest.
    ///
    /// Returns a copy of the appended block. This is the only mutator.
    pub fn append(
        &mut self,
        identity: &str,
        credential_type: &str,
        fingerprint_digest: &str,
    ) -> Result<Block, LedgerError> {
        let index = self.blocks.len() as u64;
        let mut block = Block::new(
            index,
            identity,
            credential_type,
            fingerprint_digest,
            self.latest().hash(),
            None,
        )?;
        block.seal(self.config.difficulty)?;
        self.blocks.push(block.clone());
        tracing::info!(
            index,
            credential_type,
            hash = %block.hash(),
            "block appended"
        );
        Ok(block)
    }

    /// Check link integrity over positions `1..len`, stopping at the first
    /// failure.
    pub fn validate(&self) -> bool {
        match HashChainVerifier::verify_chain(self.blocks.as_slice()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "chain validation failed");
                false
            }
        }
    }

    /// Full scan reporting every violation.
    pub fn audit(&self) -> ValidationReport {
        ChainValidator::audit(self.blocks.as_slice())
    }

    /// Digest on record for the pair, according to the configured
    /// [`LookupPolicy`].
    pub fn lookup(&self, identity: &str, credential_type: &str) -> Option<&str> {
        let found = match self.config.lookup {
            LookupPolicy::FirstWins => self
                .blocks
                .iter()
                .find(|b| b.matches(identity, credential_type)),
            LookupPolicy::LatestWins => self
                .blocks
                .iter()
                .rev()
                .find(|b| b.matches(identity, credential_type)),
        };
        found.map(Block::fingerprint_digest)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always `false`; genesis is present from construction.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    pub fn difficulty(&self) -> u32 {
        self.config.difficulty
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}
