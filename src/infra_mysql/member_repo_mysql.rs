use crate::application_port::FriendError;
use crate::domain_model::{Member, MemberId};
use crate::domain_port::MemberRepo;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlMemberRepo {
    pool: MySqlPool,
}

impl MySqlMemberRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlMemberRepo { pool }
    }
}

fn member_from_row(row: &MySqlRow) -> Result<Member, FriendError> {
    Ok(Member {
        member_id: row
            .try_get::<MemberId, _>("member_id")
            .map_err(|e| FriendError::Store(format!("decode member_id: {e}")))?,
        username: row
            .try_get::<String, _>("username")
            .map_err(|e| FriendError::Store(format!("decode username: {e}")))?,
        email: row
            .try_get::<String, _>("email")
            .map_err(|e| FriendError::Store(format!("decode email: {e}")))?,
        name: row
            .try_get::<String, _>("name")
            .map_err(|e| FriendError::Store(format!("decode name: {e}")))?,
    })
}

#[async_trait::async_trait]
impl MemberRepo for MySqlMemberRepo {
    async fn get_by_id(&self, member_id: MemberId) -> Result<Option<Member>, FriendError> {
        let row = sqlx::query(
            r#"
SELECT member_id, username, email, name
FROM member
WHERE member_id = ? AND is_active = 1
"#,
        )
        .bind(member_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FriendError::Store(format!("query member by id: {e}")))?;

        row.as_ref().map(member_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, FriendError> {
        let row = sqlx::query(
            r#"
SELECT member_id, username, email, name
FROM member
WHERE email = ? AND is_active = 1
"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FriendError::Store(format!("query member by email: {e}")))?;

        row.as_ref().map(member_from_row).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Member>, FriendError> {
        let row = sqlx::query(
            r#"
SELECT member_id, username, email, name
FROM member
WHERE username = ? AND is_active = 1
"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| FriendError::Store(format!("query member by username: {e}")))?;

        row.as_ref().map(member_from_row).transpose()
    }
}
