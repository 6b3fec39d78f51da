//! Hashing primitives for BioLedger.
//!
//! Provides plain SHA-256 digests of raw credential samples, canonical
//! (key-sorted) JSON hashing for block content, and a generic hash chain
//! verifier.
//!
//! All crypto operations wrap established libraries; there is no custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainError, ChainLink, HashChainVerifier};
pub use hasher::{canonical_json, ContentHasher, DIGEST_HEX_LEN};
