use crate::application_port::{FriendError, FriendGraphService};
use crate::domain_model::{EdgeId, FriendEdge, FriendSummary, Member, MemberId};
use crate::domain_port::{EdgeRepo, MemberRepo, TxManager};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct RealFriendGraphService {
    member_repo: Arc<dyn MemberRepo>,
    edge_repo: Arc<dyn EdgeRepo>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealFriendGraphService {
    pub fn new(
        member_repo: Arc<dyn MemberRepo>,
        edge_repo: Arc<dyn EdgeRepo>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            member_repo,
            edge_repo,
            tx_manager,
        }
    }

    async fn get_actor(&self, actor: MemberId) -> Result<Member, FriendError> {
        self.member_repo
            .get_by_id(actor)
            .await?
            .ok_or(FriendError::FailedToLogin)
    }

    /// Projects edges into listing rows, resolving the "other" member of
    /// each edge. Edges whose counterpart no longer resolves are skipped
    /// rather than failing the whole listing.
    async fn project<F>(
        &self,
        edges: Vec<FriendEdge>,
        other: F,
    ) -> Result<Vec<FriendSummary>, FriendError>
    where
        F: Fn(&FriendEdge) -> MemberId + Send,
    {
        let mut rows = Vec::with_capacity(edges.len());
        for edge in edges {
            let other_id = other(&edge);
            match self.member_repo.get_by_id(other_id).await? {
                Some(member) => rows.push(FriendSummary {
                    edge_id: edge.edge_id,
                    friend_id: member.member_id,
                    friend_name: member.name,
                    since: edge.created_at,
                }),
                None => warn!(member = %other_id, edge = %edge.edge_id, "skipping edge to unknown member"),
            }
        }
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl FriendGraphService for RealFriendGraphService {
    async fn list_friends(&self, actor: MemberId) -> Result<Vec<FriendSummary>, FriendError> {
        let mut edges = self.edge_repo.edges_by_owner(actor).await?;
        edges.retain(|e| e.accepted);
        self.project(edges, |e| e.target).await
    }

    async fn list_sent_requests(
        &self,
        actor: MemberId,
    ) -> Result<Vec<FriendSummary>, FriendError> {
        let mut edges = self.edge_repo.edges_by_owner(actor).await?;
        edges.retain(|e| !e.accepted);
        self.project(edges, |e| e.target).await
    }

    async fn list_received_requests(
        &self,
        actor: MemberId,
    ) -> Result<Vec<FriendSummary>, FriendError> {
        let mut edges = self.edge_repo.edges_by_target(actor).await?;
        edges.retain(|e| !e.accepted);
        self.project(edges, |e| e.owner).await
    }

    async fn request_friend(
        &self,
        actor: MemberId,
        target_email: &str,
    ) -> Result<EdgeId, FriendError> {
        let me = self.get_actor(actor).await?;
        if me.email == target_email {
            return Err(FriendError::InvalidRequest);
        }

        let target = self
            .member_repo
            .find_by_email(target_email)
            .await?
            .ok_or(FriendError::InvalidEmail)?;

        // One directed edge per pair, pending or accepted alike.
        let owned = self.edge_repo.edges_by_owner(actor).await?;
        if owned.iter().any(|e| e.target == target.member_id) {
            return Err(FriendError::DuplicateFriendRequest);
        }

        let edge = FriendEdge::request(actor, target.member_id);
        let edge_id = edge.edge_id;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| FriendError::Store(e.to_string()))?;
        self.edge_repo.insert_in_tx(&mut *tx, &edge).await?;
        tx.commit()
            .await
            .map_err(|e| FriendError::Store(e.to_string()))?;

        debug!(edge = %edge_id, target = %target.member_id, "friend request created");
        Ok(edge_id)
    }

    async fn approve_friend(&self, actor: MemberId, edge_id: EdgeId) -> Result<(), FriendError> {
        let edge = self
            .edge_repo
            .edge_by_id(edge_id)
            .await?
            .ok_or(FriendError::InvalidFriendId)?;

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| FriendError::Store(e.to_string()))?;

        // Flip happens before the guard. An error below abandons the tx
        // and the flip never lands.
        self.edge_repo
            .set_accepted_in_tx(&mut *tx, edge.edge_id, true)
            .await?;

        let owner = edge.owner;
        if actor == owner {
            return Err(FriendError::InvalidRequest);
        }

        // Reciprocal direction: flip the request the actor already sent,
        // or insert a fresh pre-accepted edge.
        let owned = self.edge_repo.edges_by_owner(actor).await?;
        match owned.into_iter().find(|e| e.target == owner) {
            Some(back) => {
                debug!(edge = %back.edge_id, "reciprocal request exists, flipping");
                self.edge_repo
                    .set_accepted_in_tx(&mut *tx, back.edge_id, true)
                    .await?;
            }
            None => {
                debug!(owner = %actor, target = %owner, "no reciprocal request, inserting accepted edge");
                self.edge_repo
                    .insert_in_tx(&mut *tx, &FriendEdge::pre_accepted(actor, owner))
                    .await?;
            }
        }

        tx.commit()
            .await
            .map_err(|e| FriendError::Store(e.to_string()))?;
        Ok(())
    }

    async fn remove_friend(
        &self,
        actor: MemberId,
        edge_id: EdgeId,
        force: bool,
    ) -> Result<(), FriendError> {
        let edge = self
            .edge_repo
            .edge_by_id(edge_id)
            .await?
            .ok_or(FriendError::InvalidFriendId)?;

        if !force {
            // Declining a pending request sent to the actor, nothing else.
            if edge.accepted || edge.target != actor {
                return Err(FriendError::InvalidRequest);
            }
            let mut tx = self
                .tx_manager
                .begin()
                .await
                .map_err(|e| FriendError::Store(e.to_string()))?;
            self.edge_repo.delete_in_tx(&mut *tx, edge.edge_id).await?;
            tx.commit()
                .await
                .map_err(|e| FriendError::Store(e.to_string()))?;
            return Ok(());
        }

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| FriendError::Store(e.to_string()))?;
        self.edge_repo.delete_in_tx(&mut *tx, edge.edge_id).await?;

        // Reciprocal teardown; absence is not an error.
        let reciprocal = self
            .edge_repo
            .edges_by_owner(edge.target)
            .await?
            .into_iter()
            .find(|e| e.target == edge.owner && e.edge_id != edge.edge_id);
        if let Some(back) = reciprocal {
            debug!(edge = %back.edge_id, "deleting reciprocal edge");
            self.edge_repo.delete_in_tx(&mut *tx, back.edge_id).await?;
        }

        tx.commit()
            .await
            .map_err(|e| FriendError::Store(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra_mem::{MemEdgeRepo, MemMemberRepo, MemTxManager};

    struct Fixture {
        members: Arc<MemMemberRepo>,
        edges: Arc<MemEdgeRepo>,
        service: RealFriendGraphService,
    }

    impl Fixture {
        fn new() -> Self {
            let members = Arc::new(MemMemberRepo::new());
            let edges = Arc::new(MemEdgeRepo::new());
            let service = RealFriendGraphService::new(
                members.clone(),
                edges.clone(),
                Arc::new(MemTxManager),
            );
            Fixture {
                members,
                edges,
                service,
            }
        }

        fn seed(&self, username: &str) -> Member {
            let member = Member {
                member_id: MemberId(uuid::Uuid::new_v4()),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                name: username.to_uppercase(),
            };
            self.members.insert(member.clone());
            member
        }
    }

    #[tokio::test]
    async fn request_shows_in_sent_and_received_views() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        fx.service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();

        let sent = fx.service.list_sent_requests(a.member_id).await.unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].friend_id, b.member_id);
        assert_eq!(sent[0].friend_name, b.name);

        let received = fx
            .service
            .list_received_requests(b.member_id)
            .await
            .unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].friend_id, a.member_id);

        // Not a friendship yet.
        assert!(fx.service.list_friends(a.member_id).await.unwrap().is_empty());
        assert!(fx.service.list_friends(b.member_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_request_is_rejected() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        fx.service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        let err = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::DuplicateFriendRequest));
    }

    #[tokio::test]
    async fn request_to_existing_friend_is_rejected() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        let edge = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        fx.service.approve_friend(b.member_id, edge).await.unwrap();

        let err = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::DuplicateFriendRequest));
    }

    #[tokio::test]
    async fn self_request_is_rejected() {
        let fx = Fixture::new();
        let a = fx.seed("alice");

        let err = fx
            .service
            .request_friend(a.member_id, &a.email)
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::InvalidRequest));
    }

    #[tokio::test]
    async fn unknown_email_is_rejected() {
        let fx = Fixture::new();
        let a = fx.seed("alice");

        let err = fx
            .service
            .request_friend(a.member_id, "nobody@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::InvalidEmail));
    }

    #[tokio::test]
    async fn approval_establishes_mutual_friendship() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        fx.service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        let received = fx
            .service
            .list_received_requests(b.member_id)
            .await
            .unwrap();
        fx.service
            .approve_friend(b.member_id, received[0].edge_id)
            .await
            .unwrap();

        let a_friends = fx.service.list_friends(a.member_id).await.unwrap();
        assert_eq!(a_friends.len(), 1);
        assert_eq!(a_friends[0].friend_id, b.member_id);

        let b_friends = fx.service.list_friends(b.member_id).await.unwrap();
        assert_eq!(b_friends.len(), 1);
        assert_eq!(b_friends[0].friend_id, a.member_id);

        // Pending views drained on both sides.
        assert!(fx
            .service
            .list_sent_requests(a.member_id)
            .await
            .unwrap()
            .is_empty());
        assert!(fx
            .service
            .list_received_requests(b.member_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn approval_is_idempotent() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        let edge = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        fx.service.approve_friend(b.member_id, edge).await.unwrap();
        fx.service.approve_friend(b.member_id, edge).await.unwrap();

        assert_eq!(fx.service.list_friends(a.member_id).await.unwrap().len(), 1);
        assert_eq!(fx.service.list_friends(b.member_id).await.unwrap().len(), 1);
        assert_eq!(fx.edges.len(), 2);
    }

    #[tokio::test]
    async fn crossed_requests_converge_on_approval() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        // Both sides request before either approves.
        let a_to_b = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        fx.service
            .request_friend(b.member_id, &a.email)
            .await
            .unwrap();

        // B approving A's request flips B's own pending edge too.
        fx.service.approve_friend(b.member_id, a_to_b).await.unwrap();

        assert_eq!(fx.service.list_friends(a.member_id).await.unwrap().len(), 1);
        assert_eq!(fx.service.list_friends(b.member_id).await.unwrap().len(), 1);
        assert_eq!(fx.edges.len(), 2);
    }

    #[tokio::test]
    async fn approving_unknown_edge_fails() {
        let fx = Fixture::new();
        let b = fx.seed("bob");

        let err = fx
            .service
            .approve_friend(b.member_id, EdgeId(uuid::Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::InvalidFriendId));
    }

    #[tokio::test]
    async fn approving_own_request_fails() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        let edge = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        let err = fx
            .service
            .approve_friend(a.member_id, edge)
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::InvalidRequest));

        // The aborted approval leaves no trace: the edge is still pending
        // and neither side gained a friend.
        let stored = fx.edges.edge_by_id(edge).await.unwrap().unwrap();
        assert!(!stored.accepted);
        assert!(fx.service.list_friends(a.member_id).await.unwrap().is_empty());
        assert!(fx.service.list_friends(b.member_id).await.unwrap().is_empty());
        assert_eq!(
            fx.service
                .list_received_requests(b.member_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn declining_received_request_removes_only_that_edge() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");
        let c = fx.seed("carol");

        let a_to_b = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        fx.service
            .request_friend(a.member_id, &c.email)
            .await
            .unwrap();

        fx.service
            .remove_friend(b.member_id, a_to_b, false)
            .await
            .unwrap();

        assert!(fx
            .service
            .list_received_requests(b.member_id)
            .await
            .unwrap()
            .is_empty());
        // The unrelated request to carol survives.
        assert_eq!(
            fx.service
                .list_sent_requests(a.member_id)
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn nonforce_removal_of_friendship_fails() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        let edge = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        fx.service.approve_friend(b.member_id, edge).await.unwrap();

        let err = fx
            .service
            .remove_friend(b.member_id, edge, false)
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::InvalidRequest));
    }

    #[tokio::test]
    async fn sender_cannot_decline_own_pending_request() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        let edge = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        let err = fx
            .service
            .remove_friend(a.member_id, edge, false)
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::InvalidRequest));
    }

    #[tokio::test]
    async fn force_removal_tears_down_both_directions() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        let a_to_b = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        fx.service.approve_friend(b.member_id, a_to_b).await.unwrap();

        fx.service
            .remove_friend(a.member_id, a_to_b, true)
            .await
            .unwrap();

        assert!(fx.service.list_friends(a.member_id).await.unwrap().is_empty());
        assert!(fx.service.list_friends(b.member_id).await.unwrap().is_empty());
        assert_eq!(fx.edges.len(), 0);
    }

    #[tokio::test]
    async fn force_removal_of_one_sided_edge_is_not_an_error() {
        let fx = Fixture::new();
        let a = fx.seed("alice");
        let b = fx.seed("bob");

        let a_to_b = fx
            .service
            .request_friend(a.member_id, &b.email)
            .await
            .unwrap();
        fx.service
            .remove_friend(a.member_id, a_to_b, true)
            .await
            .unwrap();

        assert_eq!(fx.edges.len(), 0);
    }

    #[tokio::test]
    async fn removing_unknown_edge_fails() {
        let fx = Fixture::new();
        let a = fx.seed("alice");

        let err = fx
            .service
            .remove_friend(a.member_id, EdgeId(uuid::Uuid::new_v4()), true)
            .await
            .unwrap_err();
        assert!(matches!(err, FriendError::InvalidFriendId));
    }
}
