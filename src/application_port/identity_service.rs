use crate::application_port::FriendError;
use crate::domain_model::MemberId;

/// Maps an authentication context (a bearer token) to the acting member.
/// Credential management and token issuance live in the external identity
/// subsystem; this side only verifies and resolves.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Fails with `FriendError::FailedToLogin` when the token does not
    /// resolve to an active member.
    async fn resolve_token(&self, token: &str) -> Result<MemberId, FriendError>;
}
