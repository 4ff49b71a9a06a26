use crate::error::ApiError;
use crate::types::{RecordId, Role};

pub const ACCESS_DENIED_MESSAGE: &str = "Only the owner can access this route";

/// Admins may act on anything; everyone else only on what they own.
pub fn verify_access(role: Role, owner: &RecordId, caller: &RecordId) -> Result<(), ApiError> {
    if role.is_admin() || owner == caller {
        tracing::debug!(%owner, %caller, %role, "access granted");
        return Ok(());
    }

    tracing::debug!(%owner, %caller, %role, "access denied");
    Err(ApiError::forbidden(ACCESS_DENIED_MESSAGE))
}
