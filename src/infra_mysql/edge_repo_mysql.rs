use super::util::downcast;
use crate::application_port::FriendError;
use crate::domain_model::{EdgeId, FriendEdge, MemberId};
use crate::domain_port::{EdgeRepo, StorageTx};
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlEdgeRepo {
    pool: MySqlPool,
}

impl MySqlEdgeRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlEdgeRepo { pool }
    }
}

fn edge_from_row(row: &MySqlRow) -> Result<FriendEdge, FriendError> {
    Ok(FriendEdge {
        edge_id: row
            .try_get::<EdgeId, _>("edge_id")
            .map_err(|e| FriendError::Store(format!("decode edge_id: {e}")))?,
        owner: row
            .try_get::<MemberId, _>("owner_id")
            .map_err(|e| FriendError::Store(format!("decode owner_id: {e}")))?,
        target: row
            .try_get::<MemberId, _>("target_id")
            .map_err(|e| FriendError::Store(format!("decode target_id: {e}")))?,
        accepted: row
            .try_get::<bool, _>("accepted")
            .map_err(|e| FriendError::Store(format!("decode accepted: {e}")))?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| FriendError::Store(format!("decode created_at: {e}")))?,
    })
}

#[async_trait::async_trait]
impl EdgeRepo for MySqlEdgeRepo {
    async fn edges_by_owner(&self, owner: MemberId) -> Result<Vec<FriendEdge>, FriendError> {
        let rows = sqlx::query(
            r#"
SELECT edge_id, owner_id, target_id, accepted, created_at
FROM friend_edge
WHERE owner_id = ?
ORDER BY created_at ASC, edge_id ASC
"#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FriendError::Store(format!("query edges by owner: {e}")))?;

        rows.iter().map(edge_from_row).collect()
    }

    async fn edges_by_target(&self, target: MemberId) -> Result<Vec<FriendEdge>, FriendError> {
        let rows = sqlx::query(
            r#"
SELECT edge_id, owner_id, target_id, accepted, created_at
FROM friend_edge
WHERE target_id = ?
ORDER BY created_at ASC, edge_id ASC
"#,
        )
        .bind(target)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| FriendError::Store(format!("query edges by target: {e}")))?;

        rows.iter().map(edge_from_row).collect()
    }

    async fn edge_by_id(&self, edge_id: EdgeId) -> Result<Option<FriendEdge>, FriendError> {
        let row = sqlx::query(
            r#"
SELECT edge_id, owner_id, target_id, accepted, created_at
FROM friend_edge
WHERE edge_id = ?
"#,
        )
        .bind(edge_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FriendError::Store(format!("query edge by id: {e}")))?;

        row.as_ref().map(edge_from_row).transpose()
    }

    async fn insert_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge: &FriendEdge,
    ) -> Result<(), FriendError> {
        let tx = downcast(tx);

        sqlx::query(
            r#"
INSERT INTO friend_edge (edge_id, owner_id, target_id, accepted, created_at)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(edge.edge_id)
        .bind(edge.owner)
        .bind(edge.target)
        .bind(edge.accepted)
        .bind(edge.created_at)
        .execute(tx.conn())
        .await
        .map_err(|e| FriendError::Store(format!("insert friend edge: {e}")))?;

        Ok(())
    }

    async fn set_accepted_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge_id: EdgeId,
        accepted: bool,
    ) -> Result<(), FriendError> {
        let tx = downcast(tx);

        let res = sqlx::query("UPDATE friend_edge SET accepted = ? WHERE edge_id = ?")
            .bind(accepted)
            .bind(edge_id)
            .execute(tx.conn())
            .await
            .map_err(|e| FriendError::Store(format!("update friend edge: {e}")))?;

        // Matched-but-unchanged rows report 0 affected; only a vanished row
        // is an error.
        if res.rows_affected() == 0 {
            let exists = sqlx::query("SELECT 1 FROM friend_edge WHERE edge_id = ?")
                .bind(edge_id)
                .fetch_optional(tx.conn())
                .await
                .map_err(|e| FriendError::Store(format!("recheck friend edge: {e}")))?;
            if exists.is_none() {
                return Err(FriendError::InvalidFriendId);
            }
        }

        Ok(())
    }

    async fn delete_in_tx(
        &self,
        tx: &mut dyn StorageTx<'_>,
        edge_id: EdgeId,
    ) -> Result<(), FriendError> {
        let tx = downcast(tx);

        sqlx::query("DELETE FROM friend_edge WHERE edge_id = ?")
            .bind(edge_id)
            .execute(tx.conn())
            .await
            .map_err(|e| FriendError::Store(format!("delete friend edge: {e}")))?;

        Ok(())
    }
}
