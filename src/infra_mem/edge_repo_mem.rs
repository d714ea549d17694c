use super::repo_tx_mem::{EdgeOp, downcast};
use crate::application_port::FriendError;
use crate::domain_model::{EdgeId, FriendEdge, MemberId};
use crate::domain_port::{EdgeRepo, StorageTx};
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory edge store. Mutations are buffered in the `MemTx` and only
/// land on commit, so reads see pre-transaction state until then.
#[derive(Default)]
pub struct MemEdgeRepo {
    edges: Arc<DashMap<EdgeId, FriendEdge>>,
}

impl MemEdgeRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[async_trait::async_trait]
impl EdgeRepo for MemEdgeRepo {
    async fn edges_by_owner(&self, owner: MemberId) -> Result<Vec<FriendEdge>, FriendError> {
        let mut out: Vec<FriendEdge> = self
            .edges
            .iter()
            .filter(|e| e.owner == owner)
            .map(|e| e.clone())
            .collect();
        out.sort_by_key(|e| (e.created_at, e.edge_id));
        Ok(out)
    }

    async fn edges_by_target(&self, target: MemberId) -> Result<Vec<FriendEdge>, FriendError> {
        let mut out: Vec<FriendEdge> = self
            .edges
            .iter()
            .filter(|e| e.target == target)
            .map(|e| e.clone())
            .collect();
        out.sort_by_key(|e| (e.created_at, e.edge_id));
        Ok(out)
    }

    async fn edge_by_id(&self, edge_id: EdgeId) -> Result<Option<FriendEdge>, FriendError> {
        Ok(self.edges.get(&edge_id).map(|e| e.clone()))
    }

    async fn insert_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge: &FriendEdge,
    ) -> Result<(), FriendError> {
        downcast(tx).enqueue(self.edges.clone(), EdgeOp::Insert(edge.clone()));
        Ok(())
    }

    async fn set_accepted_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge_id: EdgeId,
        accepted: bool,
    ) -> Result<(), FriendError> {
        if !self.edges.contains_key(&edge_id) {
            return Err(FriendError::InvalidFriendId);
        }
        downcast(tx).enqueue(self.edges.clone(), EdgeOp::SetAccepted(edge_id, accepted));
        Ok(())
    }

    async fn delete_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge_id: EdgeId,
    ) -> Result<(), FriendError> {
        downcast(tx).enqueue(self.edges.clone(), EdgeOp::Delete(edge_id));
        Ok(())
    }
}
