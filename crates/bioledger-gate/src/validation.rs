use crate::error::{GatewayError, GatewayResult};
use crate::request::CredentialRequest;

/// Structural validation of a credential request.
///
/// Every field must contain at least one non-whitespace character. The first
/// blank field is named in the error.
pub fn validate_request(request: &CredentialRequest) -> GatewayResult<()> {
    require_non_blank("identity", &request.identity)?;
    require_non_blank("sample", &request.sample)?;
    require_non_blank("credential_type", &request.credential_type)?;
    Ok(())
}

/// Validate the (identity, credential type) pair alone, for lookups that
/// carry no sample.
pub fn validate_pair(identity: &str, credential_type: &str) -> GatewayResult<()> {
    require_non_blank("identity", identity)?;
    require_non_blank("credential_type", credential_type)
}

fn require_non_blank(field: &str, value: &str) -> GatewayResult<()> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}
