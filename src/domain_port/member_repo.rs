use crate::application_port::FriendError;
use crate::domain_model::{Member, MemberId};

/// Lookup over the member table owned by the external identity subsystem.
/// This core never writes members.
#[async_trait::async_trait]
pub trait MemberRepo: Send + Sync {
    async fn get_by_id(&self, member_id: MemberId) -> Result<Option<Member>, FriendError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, FriendError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, FriendError>;
}
