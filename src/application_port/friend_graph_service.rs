use crate::domain_model::*;

/// User-facing business errors. None of these are retryable; each aborts
/// the operation and is reported to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum FriendError {
    #[error("no resolvable login identity")]
    FailedToLogin,
    #[error("invalid friend request")]
    InvalidRequest,
    #[error("no member with that email")]
    InvalidEmail,
    #[error("friend request or friendship already exists")]
    DuplicateFriendRequest,
    #[error("friend edge not found")]
    InvalidFriendId,
    #[error("store error: {0}")]
    Store(String),
}

#[async_trait::async_trait]
pub trait FriendGraphService: Send + Sync {
    /// Accepted edges owned by `actor`, projected on the edge target.
    async fn list_friends(&self, actor: MemberId) -> Result<Vec<FriendSummary>, FriendError>;

    /// Pending requests `actor` sent and nobody approved yet.
    async fn list_sent_requests(
        &self,
        actor: MemberId,
    ) -> Result<Vec<FriendSummary>, FriendError>;

    /// Pending requests `actor` received, projected on the edge owner.
    /// The only by-target lookup in the service.
    async fn list_received_requests(
        &self,
        actor: MemberId,
    ) -> Result<Vec<FriendSummary>, FriendError>;

    /// Creates a pending edge from `actor` to the member behind
    /// `target_email`.
    async fn request_friend(
        &self,
        actor: MemberId,
        target_email: &str,
    ) -> Result<EdgeId, FriendError>;

    /// Accepts the edge and ensures the reciprocal accepted edge exists,
    /// establishing a mutual friendship.
    async fn approve_friend(&self, actor: MemberId, edge_id: EdgeId) -> Result<(), FriendError>;

    /// Non-force: decline a pending request addressed to `actor`.
    /// Force: delete the edge and its reciprocal, tearing the friendship
    /// down from one side.
    async fn remove_friend(
        &self,
        actor: MemberId,
        edge_id: EdgeId,
        force: bool,
    ) -> Result<(), FriendError>;
}
