use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct MemberId(pub uuid::Uuid);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::from_str(s).map(MemberId)
    }
}

/// A member as seen by the friend graph. Members are created and destroyed
/// by the external identity subsystem; this core only reads them.
#[derive(Debug, Clone)]
pub struct Member {
    pub member_id: MemberId,
    pub username: String,
    pub email: String,
    pub name: String,
}
