use std::time::{SystemTime, UNIX_EPOCH};

use bioledger_crypto::{ChainLink, ContentHasher};
use serde::Serialize;
use serde_json::json;

use crate::error::LedgerError;
use crate::pow::{meets_difficulty, MAX_DIFFICULTY};

/// Identity, credential type and digest carried by the genesis block.
pub const GENESIS_SENTINEL: &str = "GENESIS";

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// A single ledger record binding an identity and credential type to the
/// digest of a credential sample.
///
/// `hash` is only ever assigned from [`Block::recompute_hash`], at
/// construction and on every nonce change during [`Block::seal`]. Once a
/// block is appended to a chain it is never mutated again.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    pub(crate) index: u64,
    pub(crate) identity: String,
    pub(crate) credential_type: String,
    pub(crate) fingerprint_digest: String,
    pub(crate) timestamp: f64,
    pub(crate) previous_hash: String,
    pub(crate) nonce: u64,
    pub(crate) hash: String,
}

impl Block {
    /// Build an unsealed block (`nonce = 0`) and compute its hash.
    ///
    /// `timestamp` defaults to the current wall-clock time in fractional
    /// seconds since the UNIX epoch.
    pub fn new(
        index: u64,
        identity: impl Into<String>,
        credential_type: impl Into<String>,
        fingerprint_digest: impl Into<String>,
        previous_hash: impl Into<String>,
        timestamp: Option<f64>,
    ) -> Result<Self, LedgerError> {
        let identity = identity.into();
        let credential_type = credential_type.into();
        let fingerprint_digest = fingerprint_digest.into();

        for (field, value) in [
            ("identity", &identity),
            ("credential_type", &credential_type),
            ("fingerprint_digest", &fingerprint_digest),
        ] {
            if value.trim().is_empty() {
                return Err(LedgerError::InvalidBlock(format!("{field} must not be empty")));
            }
        }

        Ok(Self::build(
            index,
            identity,
            credential_type,
            fingerprint_digest,
            previous_hash.into(),
            timestamp.unwrap_or_else(now_secs),
        ))
    }

    pub(crate) fn build(
        index: u64,
        identity: String,
        credential_type: String,
        fingerprint_digest: String,
        previous_hash: String,
        timestamp: f64,
    ) -> Self {
        let mut block = Self {
            index,
            identity,
            credential_type,
            fingerprint_digest,
            timestamp,
            previous_hash,
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.recompute_hash();
        block
    }

    /// Digest of the block's canonical content, including the current nonce.
    ///
    /// Pure: a verifier can call this on any block without mutating it.
    pub fn recompute_hash(&self) -> String {
        ContentHasher::digest_canonical(&json!({
            "index": self.index,
            "identity": self.identity,
            "credential_type": self.credential_type,
            "fingerprint_digest": self.fingerprint_digest,
            "timestamp": self.timestamp,
            "previous_hash": self.previous_hash,
            "nonce": self.nonce,
        }))
    }

    /// Proof-of-work search.
    ///
    /// Increments the nonce and recomputes the hash until the hex hash starts
    /// with `difficulty` zeros. The current hash is checked first, so a block
    /// that already satisfies the target keeps its nonce. Returns the number
    /// of hashes computed. Blocks the calling thread; expected cost is about
    /// `16^difficulty` hashes.
    ///
    /// A difficulty above [`MAX_DIFFICULTY`] can never be met and is rejected.
    pub fn seal(&mut self, difficulty: u32) -> Result<u64, LedgerError> {
        if difficulty > MAX_DIFFICULTY {
            return Err(LedgerError::InvalidDifficulty {
                difficulty,
                max: MAX_DIFFICULTY,
            });
        }
        let mut attempts = 0u64;
        while !meets_difficulty(&self.hash, difficulty) {
            self.nonce += 1;
            self.hash = self.recompute_hash();
            attempts += 1;
        }
        tracing::debug!(
            index = self.index,
            nonce = self.nonce,
            attempts,
            difficulty,
            "block sealed"
        );
        Ok(attempts)
    }

    /// Returns `true` if the stored hash satisfies `difficulty`.
    pub fn is_sealed(&self, difficulty: u32) -> bool {
        meets_difficulty(&self.hash, difficulty)
    }

    /// Returns `true` if the stored hash equals the recomputed one.
    pub fn is_consistent(&self) -> bool {
        self.recompute_hash() == self.hash
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn credential_type(&self) -> &str {
        &self.credential_type
    }

    pub fn fingerprint_digest(&self) -> &str {
        &self.fingerprint_digest
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns `true` if this block records the given pair.
    pub fn matches(&self, identity: &str, credential_type: &str) -> bool {
        self.identity == identity && self.credential_type == credential_type
    }
}

impl ChainLink for Block {
    fn link_hash(&self) -> &str {
        &self.hash
    }

    fn previous_link(&self) -> &str {
        &self.previous_hash
    }

    fn recompute_link(&self) -> String {
        self.recompute_hash()
    }
}

pub(crate) fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
