use uuid::Uuid;

use crate::error::ApiError;

/// Resource-level authorization: the authenticated subject must be the
/// resource's declared owner.
///
/// Runs after the authentication gate, so a mismatch is Forbidden rather
/// than Unauthorized - the requester is known, just not entitled. Handlers
/// call this once the owner id is known from the route, and again against a
/// fetched record's stored owner where the two can diverge.
pub fn require_owner(subject: Uuid, owner: Uuid) -> Result<(), ApiError> {
    if subject == owner {
        Ok(())
    } else {
        Err(ApiError::forbidden("Resource does not belong to the authenticated user"))
    }
}
