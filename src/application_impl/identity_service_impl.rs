use crate::application_port::{FriendError, IdentityService};
use crate::domain_model::MemberId;
use crate::domain_port::MemberRepo;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JwtIdentityConfig {
    pub issuer: String,
    pub audience: String,
    pub signing_key: Vec<u8>,
}

/// Resolves HS256 bearer tokens issued by the external identity subsystem.
/// The subject claim carries the member id; the member must still resolve
/// in the store.
pub struct JwtIdentityService {
    member_repo: Arc<dyn MemberRepo>,
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

impl JwtIdentityService {
    pub fn new(member_repo: Arc<dyn MemberRepo>, config: JwtIdentityConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Self {
            member_repo,
            decoding_key: DecodingKey::from_secret(&config.signing_key),
            validation,
        }
    }
}

#[async_trait::async_trait]
impl IdentityService for JwtIdentityService {
    async fn resolve_token(&self, token: &str) -> Result<MemberId, FriendError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!("token rejected: {e}");
                FriendError::FailedToLogin
            })?;

        let member_id = data
            .claims
            .sub
            .parse::<MemberId>()
            .map_err(|_| FriendError::FailedToLogin)?;

        match self.member_repo.get_by_id(member_id).await? {
            Some(member) => Ok(member.member_id),
            None => Err(FriendError::FailedToLogin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::Member;
    use crate::infra_mem::MemMemberRepo;
    use jsonwebtoken::{EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: usize,
        iss: String,
        aud: String,
    }

    fn mint(member_id: MemberId, key: &[u8]) -> String {
        let claims = TestClaims {
            sub: member_id.to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            iss: "amity.identity".to_string(),
            aud: "amity-client".to_string(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(key)).unwrap()
    }

    fn service(members: Arc<MemMemberRepo>) -> JwtIdentityService {
        JwtIdentityService::new(
            members,
            JwtIdentityConfig {
                issuer: "amity.identity".to_string(),
                audience: "amity-client".to_string(),
                signing_key: b"test-secret".to_vec(),
            },
        )
    }

    #[tokio::test]
    async fn valid_token_resolves_member() {
        let members = Arc::new(MemMemberRepo::new());
        let member = Member {
            member_id: MemberId(uuid::Uuid::new_v4()),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        };
        members.insert(member.clone());

        let svc = service(members);
        let token = mint(member.member_id, b"test-secret");
        assert_eq!(svc.resolve_token(&token).await.unwrap(), member.member_id);
    }

    #[tokio::test]
    async fn unknown_member_fails_even_with_valid_token() {
        let svc = service(Arc::new(MemMemberRepo::new()));
        let token = mint(MemberId(uuid::Uuid::new_v4()), b"test-secret");
        assert!(matches!(
            svc.resolve_token(&token).await.unwrap_err(),
            FriendError::FailedToLogin
        ));
    }

    #[tokio::test]
    async fn wrong_key_is_rejected() {
        let svc = service(Arc::new(MemMemberRepo::new()));
        let token = mint(MemberId(uuid::Uuid::new_v4()), b"other-secret");
        assert!(matches!(
            svc.resolve_token(&token).await.unwrap_err(),
            FriendError::FailedToLogin
        ));
    }
}
