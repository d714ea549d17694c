use crate::application_port::FriendError;
use crate::domain_model::{Member, MemberId};
use crate::domain_port::MemberRepo;
use dashmap::DashMap;

/// In-memory member table. The identity subsystem owns members, so this
/// repo only offers `insert` for seeding outside the port.
#[derive(Default)]
pub struct MemMemberRepo {
    members: DashMap<MemberId, Member>,
}

impl MemMemberRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, member: Member) {
        self.members.insert(member.member_id, member);
    }
}

#[async_trait::async_trait]
impl MemberRepo for MemMemberRepo {
    async fn get_by_id(&self, member_id: MemberId) -> Result<Option<Member>, FriendError> {
        Ok(self.members.get(&member_id).map(|m| m.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, FriendError> {
        Ok(self
            .members
            .iter()
            .find(|m| m.email == email)
            .map(|m| m.clone()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, FriendError> {
        Ok(self
            .members
            .iter()
            .find(|m| m.username == username)
            .map(|m| m.clone()))
    }
}
