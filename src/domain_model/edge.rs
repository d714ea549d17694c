use crate::domain_model::MemberId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct EdgeId(pub uuid::Uuid);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EdgeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(EdgeId)
    }
}

/// Directed friend edge. A friendship is two accepted edges in opposite
/// directions; a single edge with `accepted = false` is a pending request
/// from `owner` to `target`.
#[derive(Debug, Clone)]
pub struct FriendEdge {
    pub edge_id: EdgeId,
    pub owner: MemberId,
    pub target: MemberId,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl FriendEdge {
    /// A fresh pending request from `owner` to `target`.
    pub fn request(owner: MemberId, target: MemberId) -> Self {
        FriendEdge {
            edge_id: EdgeId(uuid::Uuid::new_v4()),
            owner,
            target,
            accepted: false,
            created_at: Utc::now(),
        }
    }

    /// A pre-accepted edge, created when approval finds no reciprocal
    /// request to flip.
    pub fn pre_accepted(owner: MemberId, target: MemberId) -> Self {
        FriendEdge {
            accepted: true,
            ..FriendEdge::request(owner, target)
        }
    }
}

/// One row of a friend/request listing: the edge plus the other member's
/// identity and display name.
#[derive(Debug, Clone, Serialize)]
pub struct FriendSummary {
    pub edge_id: EdgeId,
    pub friend_id: MemberId,
    pub friend_name: String,
    pub since: DateTime<Utc>,
}
