use crate::application_port::{FriendError, IdentityService};
use crate::domain_model::MemberId;
use crate::domain_port::MemberRepo;
use std::sync::Arc;

// Minimal fake implementation for basic use only: the token is the member's
// username behind a fixed prefix.
pub struct FakeIdentityService {
    member_repo: Arc<dyn MemberRepo>,
}

impl FakeIdentityService {
    pub fn new(member_repo: Arc<dyn MemberRepo>) -> Self {
        Self { member_repo }
    }
}

#[async_trait::async_trait]
impl IdentityService for FakeIdentityService {
    async fn resolve_token(&self, token: &str) -> Result<MemberId, FriendError> {
        let username = token
            .strip_prefix("fake-access-token:")
            .ok_or(FriendError::FailedToLogin)?;

        match self.member_repo.find_by_username(username).await? {
            Some(member) => Ok(member.member_id),
            None => Err(FriendError::FailedToLogin),
        }
    }
}
