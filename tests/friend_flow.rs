use amity::application_impl::{FakeIdentityService, RealFriendGraphService};
use amity::application_port::{FriendGraphService, IdentityService};
use amity::domain_model::{Member, MemberId};
use amity::infra_mem::{MemEdgeRepo, MemMemberRepo, MemTxManager};
use std::sync::Arc;

fn seed(members: &MemMemberRepo, username: &str, email: &str) -> Member {
    let member = Member {
        member_id: MemberId(uuid::Uuid::new_v4()),
        username: username.to_string(),
        email: email.to_string(),
        name: username.to_uppercase(),
    };
    members.insert(member.clone());
    member
}

// Full lifecycle: request -> approve -> force removal, driven the way the
// API layer drives it (identity token first, then service calls).
#[tokio::test]
async fn request_approve_force_remove_round_trip() {
    let members = Arc::new(MemMemberRepo::new());
    let edges = Arc::new(MemEdgeRepo::new());
    let identity = FakeIdentityService::new(members.clone());
    let service = RealFriendGraphService::new(members.clone(), edges.clone(), Arc::new(MemTxManager));

    let a = seed(&members, "a", "a@x");
    let b = seed(&members, "b", "b@x");

    let actor_a = identity.resolve_token("fake-access-token:a").await.unwrap();
    let actor_b = identity.resolve_token("fake-access-token:b").await.unwrap();
    assert_eq!(actor_a, a.member_id);
    assert_eq!(actor_b, b.member_id);

    // A requests B by email.
    let a_to_b = service.request_friend(actor_a, "b@x").await.unwrap();

    // B sees the request and approves it via the received list.
    let received = service.list_received_requests(actor_b).await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].edge_id, a_to_b);
    service
        .approve_friend(actor_b, received[0].edge_id)
        .await
        .unwrap();

    let a_friends = service.list_friends(actor_a).await.unwrap();
    let b_friends = service.list_friends(actor_b).await.unwrap();
    assert_eq!(a_friends.len(), 1);
    assert_eq!(a_friends[0].friend_id, b.member_id);
    assert_eq!(b_friends.len(), 1);
    assert_eq!(b_friends[0].friend_id, a.member_id);

    // A tears the friendship down from their own edge.
    service.remove_friend(actor_a, a_to_b, true).await.unwrap();

    assert!(service.list_friends(actor_a).await.unwrap().is_empty());
    assert!(service.list_friends(actor_b).await.unwrap().is_empty());
    assert!(edges.is_empty());
}

#[tokio::test]
async fn unknown_fake_token_does_not_resolve() {
    let members = Arc::new(MemMemberRepo::new());
    let identity = FakeIdentityService::new(members.clone());

    assert!(identity.resolve_token("fake-access-token:ghost").await.is_err());
    assert!(identity.resolve_token("not-even-a-token").await.is_err());
}
