use crate::domain_model::{EdgeId, FriendEdge};
use crate::domain_port::{StorageTx, TxManager};
use dashmap::DashMap;
use std::sync::Arc;

pub struct MemTxManager;

#[async_trait::async_trait]
impl TxManager for MemTxManager {
    async fn begin<'t>(&'t self) -> anyhow::Result<Box<dyn StorageTx<'t> + 't>> {
        Ok(Box::new(MemTx::new()))
    }
}

pub(crate) enum EdgeOp {
    Insert(FriendEdge),
    SetAccepted(EdgeId, bool),
    Delete(EdgeId),
}

/// Buffers writes until commit. Dropping the tx without committing (or
/// rolling back) discards the buffer, so an aborted operation leaves the
/// store untouched, same as the MySQL backend.
pub struct MemTx {
    ops: Vec<(Arc<DashMap<EdgeId, FriendEdge>>, EdgeOp)>,
}

impl MemTx {
    fn new() -> Self {
        MemTx { ops: Vec::new() }
    }

    pub(crate) fn enqueue(&mut self, edges: Arc<DashMap<EdgeId, FriendEdge>>, op: EdgeOp) {
        self.ops.push((edges, op));
    }
}

#[async_trait::async_trait]
impl<'t> StorageTx<'t> for MemTx {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        for (edges, op) in self.ops {
            match op {
                EdgeOp::Insert(edge) => {
                    edges.insert(edge.edge_id, edge);
                }
                EdgeOp::SetAccepted(edge_id, accepted) => {
                    if let Some(mut edge) = edges.get_mut(&edge_id) {
                        edge.accepted = accepted;
                    }
                }
                EdgeOp::Delete(edge_id) => {
                    edges.remove(&edge_id);
                }
            }
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}

pub(crate) fn downcast<'a, 't>(tx: &'a mut dyn StorageTx<'t>) -> &'a mut MemTx {
    unsafe {
        let p = tx as *mut dyn StorageTx<'t>;
        let p = p as *mut MemTx;
        &mut *p
    }
}
