/// Trait for records that participate in a hex-digest hash chain.
pub trait ChainLink {
    /// The record's stored hash.
    fn link_hash(&self) -> &str;
    /// The stored hash of the record before it.
    fn previous_link(&self) -> &str;
    /// Hash recomputed from the record's current content.
    fn recompute_link(&self) -> String;
}

/// Hash chain integrity verifier.
///
/// Verifies that a sequence of records forms a valid hash chain:
/// each record's previous link matches the stored hash of the record before
/// it, and each record's stored hash matches its recomputed content hash.
/// The first record is the chain's anchor and is not checked.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain, stopping at the first broken position.
    pub fn verify_chain<L: ChainLink>(links: &[L]) -> Result<(), ChainError> {
        for index in 1..links.len() {
            let current = &links[index];
            if current.recompute_link() != current.link_hash() {
                return Err(ChainError::HashMismatch { index });
            }
            if current.previous_link() != links[index - 1].link_hash() {
                return Err(ChainError::BrokenLink { index });
            }
        }
        Ok(())
    }

    /// Returns `true` if the chain verifies.
    pub fn is_valid<L: ChainLink>(links: &[L]) -> bool {
        Self::verify_chain(links).is_ok()
    }
}

/// Errors from chain verification.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("broken link at index {index}: previous hash does not match")]
    BrokenLink { index: usize },

    #[error("hash mismatch at index {index}: computed hash differs from stored")]
    HashMismatch { index: usize },
}

impl ChainError {
    /// Position of the offending record.
    pub fn index(&self) -> usize {
        match self {
            Self::BrokenLink { index } | Self::HashMismatch { index } => *index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContentHasher;

    struct TestLink {
        hash: String,
        prev: String,
        payload: String,
    }

    impl ChainLink for TestLink {
        fn link_hash(&self) -> &str {
            &self.hash
        }
        fn previous_link(&self) -> &str {
            &self.prev
        }
        fn recompute_link(&self) -> String {
            ContentHasher::digest(format!("{}|{}", self.prev, self.payload).as_bytes())
        }
    }

    fn build_chain(count: usize) -> Vec<TestLink> {
        let mut chain: Vec<TestLink> = Vec::new();
        let mut prev = "0".to_string();

        for i in 0..count {
            let mut link = TestLink {
                hash: String::new(),
                prev: prev.clone(),
                payload: format!("record-{i}"),
            };
            link.hash = link.recompute_link();
            prev = link.hash.clone();
            chain.push(link);
        }

        chain
    }

    #[test]
    fn empty_chain_is_valid() {
        let chain: Vec<TestLink> = vec![];
        assert!(HashChainVerifier::verify_chain(&chain).is_ok());
    }

    #[test]
    fn single_link_chain() {
        assert!(HashChainVerifier::is_valid(&build_chain(1)));
    }

    #[test]
    fn multi_link_chain() {
        assert!(HashChainVerifier::is_valid(&build_chain(10)));
    }

    #[test]
    fn anchor_is_not_checked() {
        let mut chain = build_chain(3);
        chain[0].payload = "rewritten anchor".into();
        assert!(HashChainVerifier::verify_chain(&chain).is_ok());
    }

    #[test]
    fn broken_link_detected() {
        let mut chain = build_chain(3);
        chain[2].prev = "f".repeat(64);
        chain[2].hash = chain[2].recompute_link();
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 2 });
        assert_eq!(err.index(), 2);
    }

    #[test]
    fn tampered_payload_detected() {
        let mut chain = build_chain(3);
        chain[1].payload = "tampered".into();
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::HashMismatch { index: 1 });
    }

    #[test]
    fn first_failure_wins() {
        let mut chain = build_chain(5);
        chain[3].payload = "tampered".into();
        chain[1].payload = "tampered".into();
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err.index(), 1);
    }
}
