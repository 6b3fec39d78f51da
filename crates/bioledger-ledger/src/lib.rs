//! Append-only credential ledger for BioLedger.
//!
//! This crate is the heart of BioLedger. It provides:
//! - `Block` records binding an identity and credential type to a sample digest
//! - Proof-of-work sealing with a leading-zero difficulty target
//! - `Chain`, the genesis-anchored, hash-linked block sequence
//! - `ChainWriter` / `ChainReader` trait boundaries
//! - `SharedChain`, a reader-writer locked chain for concurrent callers
//! - Full-chain audits (hash integrity, link integrity, index sequence)

pub mod block;
pub mod chain;
pub mod config;
pub mod error;
pub mod pow;
pub mod shared;
pub mod traits;
pub mod validation;

pub use block::{Block, GENESIS_PREVIOUS_HASH, GENESIS_SENTINEL};
pub use chain::Chain;
pub use config::{ChainConfig, LookupPolicy, DEFAULT_DIFFICULTY};
pub use error::LedgerError;
pub use pow::{meets_difficulty, MAX_DIFFICULTY};
pub use shared::SharedChain;
pub use traits::{ChainReader, ChainWriter};
pub use validation::{ChainValidator, ValidationReport, Violation, ViolationKind};
