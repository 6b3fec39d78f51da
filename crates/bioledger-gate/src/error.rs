use bioledger_ledger::LedgerError;

/// Domain-level outcomes of gateway operations.
///
/// None of these are retried internally; each is reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// A required field is missing or blank.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No record exists for the (identity, credential type) pair.
    #[error("biometric not registered for {identity} ({credential_type})")]
    NotRegistered {
        identity: String,
        credential_type: String,
    },

    /// The supplied sample does not match the digest on record.
    #[error("biometric mismatch")]
    Mismatch,

    /// An explicit integrity check found the chain broken.
    #[error("chain corruption at index {index}: {reason}")]
    ChainCorruption { index: u64, reason: String },

    /// Any other ledger failure.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for GatewayError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ChainCorruption { index, reason } => {
                Self::ChainCorruption { index, reason }
            }
            LedgerError::InvalidBlock(reason) => Self::InvalidInput(reason),
            other => Self::Ledger(other),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_map_to_domain_errors() {
        assert_eq!(
            GatewayError::from(LedgerError::ChainCorruption {
                index: 3,
                reason: "x".into()
            }),
            GatewayError::ChainCorruption {
                index: 3,
                reason: "x".into()
            }
        );
        assert!(matches!(
            GatewayError::from(LedgerError::InvalidBlock("identity must not be empty".into())),
            GatewayError::InvalidInput(_)
        ));
        assert_eq!(
            GatewayError::from(LedgerError::LockPoisoned),
            GatewayError::Ledger(LedgerError::LockPoisoned)
        );
    }

    #[test]
    fn display_messages() {
        assert_eq!(GatewayError::Mismatch.to_string(), "biometric mismatch");
        assert_eq!(
            GatewayError::NotRegistered {
                identity: "bob".into(),
                credential_type: "fingerprint".into()
            }
            .to_string(),
            "biometric not registered for bob (fingerprint)"
        );
    }
}
