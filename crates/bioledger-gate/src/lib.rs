//! Credential gateway for BioLedger.
//!
//! The gateway is the only path between callers and the chain. It validates
//! (identity, sample, credential type) triples, digests samples, anchors
//! digests on registration and compares them on verification.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use bioledger_gate::{CredentialGateway, GatewayError};
//! use bioledger_ledger::{ChainConfig, SharedChain};
//!
//! let chain = SharedChain::with_config(ChainConfig::with_difficulty(1)).unwrap();
//! let gateway = CredentialGateway::new(Arc::new(chain));
//!
//! gateway.register("alice", "thumbprint-raw-A", "fingerprint").unwrap();
//! assert!(gateway.verify("alice", "thumbprint-raw-A", "fingerprint").is_ok());
//! assert_eq!(
//!     gateway.verify("alice", "thumbprint-raw-B", "fingerprint"),
//!     Err(GatewayError::Mismatch)
//! );
//! ```

pub mod error;
pub mod gateway;
pub mod request;
pub mod validation;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{CredentialGateway, CredentialStatus, Registration};
pub use request::CredentialRequest;
pub use validation::{validate_pair, validate_request};
