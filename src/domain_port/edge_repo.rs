use crate::application_port::FriendError;
use crate::domain_model::{EdgeId, FriendEdge, MemberId};
use crate::domain_port::repo_tx::StorageTx;

/// Store of directed friend edges. Reads go against the pool; mutations go
/// through the caller's transaction. The store does not enforce uniqueness
/// of `(owner, target)` pairs — that check lives in the service.
#[async_trait::async_trait]
pub trait EdgeRepo: Send + Sync {
    async fn edges_by_owner(&self, owner: MemberId) -> Result<Vec<FriendEdge>, FriendError>;

    async fn edges_by_target(&self, target: MemberId) -> Result<Vec<FriendEdge>, FriendError>;

    async fn edge_by_id(&self, edge_id: EdgeId) -> Result<Option<FriendEdge>, FriendError>;

    async fn insert_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge: &FriendEdge,
    ) -> Result<(), FriendError>;

    async fn set_accepted_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge_id: EdgeId,
        accepted: bool,
    ) -> Result<(), FriendError>;

    async fn delete_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge_id: EdgeId,
    ) -> Result<(), FriendError>;
}
