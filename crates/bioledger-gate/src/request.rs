use serde::{Deserialize, Serialize};

/// An (identity, raw sample, credential type) triple presented to the gateway.
///
/// Field names on the wire follow the public HTTP API (`user_id`,
/// `biometric_data`, `biometric_type`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRequest {
    #[serde(rename = "user_id")]
    pub identity: String,
    #[serde(rename = "biometric_data")]
    pub sample: String,
    #[serde(rename = "biometric_type")]
    pub credential_type: String,
}

impl CredentialRequest {
    pub fn new(
        identity: impl Into<String>,
        sample: impl Into<String>,
        credential_type: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            sample: sample.into(),
            credential_type: credential_type.into(),
        }
    }
}
