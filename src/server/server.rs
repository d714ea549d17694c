use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_mem::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;

pub struct Server {
    pub identity_service: Arc<dyn IdentityService>,
    pub friend_service: Arc<dyn FriendGraphService>,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let (member_repo, edge_repo, tx_manager, pool): (
            Arc<dyn MemberRepo>,
            Arc<dyn EdgeRepo>,
            Arc<dyn TxManager>,
            Option<Pool<MySql>>,
        ) = match settings.store.backend.as_str() {
            "fake" => (
                Arc::new(MemMemberRepo::new()),
                Arc::new(MemEdgeRepo::new()),
                Arc::new(MemTxManager),
                None,
            ),
            "real" => {
                let pool = Pool::<MySql>::connect(&settings.store.dsn).await?;
                (
                    Arc::new(MySqlMemberRepo::new(pool.clone())),
                    Arc::new(MySqlEdgeRepo::new(pool.clone())),
                    Arc::new(MySqlTxManager::new(pool.clone())),
                    Some(pool),
                )
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        let identity_service: Arc<dyn IdentityService> = match settings.identity.backend.as_str() {
            "fake" => Arc::new(FakeIdentityService::new(member_repo.clone())),
            "real" => {
                let key = std::env::var("JWT_SIGNING_KEY")
                    .unwrap_or_else(|_| "my-dev-secret-key".to_string())
                    .into_bytes();
                Arc::new(JwtIdentityService::new(
                    member_repo.clone(),
                    JwtIdentityConfig {
                        issuer: settings.identity.issuer.clone(),
                        audience: settings.identity.audience.clone(),
                        signing_key: key,
                    },
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown identity backend: {}", other)),
        };

        let friend_service: Arc<dyn FriendGraphService> = Arc::new(RealFriendGraphService::new(
            member_repo,
            edge_repo,
            tx_manager,
        ));

        info!("server started");

        Ok(Self {
            identity_service,
            friend_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
