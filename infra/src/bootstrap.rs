//! Wiring from `AppConfig` to concrete revocation stores and services

use std::sync::Arc;

use tracing::info;

use tg_core::repositories::{InMemoryRevocationStore, RevocationStore};
use tg_core::services::token::{TokenService, TokenServiceConfig};
use tg_shared::config::{AppConfig, RevocationBackend};

use crate::cache::{RedisClient, RedisRevocationStore};
use crate::database::{DatabasePool, MySqlRevocationStore};
use crate::InfrastructureError;

/// Connect the revocation store selected by `config.revocation.backend`
///
/// The MySQL backend creates its table if missing.
pub async fn connect_revocation_store(
    config: &AppConfig,
) -> Result<Arc<dyn RevocationStore>, InfrastructureError> {
    let backend = config.revocation.backend;
    info!("Connecting revocation store backend: {}", backend);

    let store: Arc<dyn RevocationStore> = match backend {
        RevocationBackend::Memory => Arc::new(InMemoryRevocationStore::new()),
        RevocationBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone()).await?;
            let store = MySqlRevocationStore::new(pool.get_pool().clone());
            store
                .ensure_schema()
                .await
                .map_err(|e| InfrastructureError::General(e.to_string()))?;
            Arc::new(store)
        }
        RevocationBackend::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            Arc::new(RedisRevocationStore::new(client))
        }
    };

    Ok(store)
}

/// Build a token service over the configured store
pub async fn build_token_service(
    config: &AppConfig,
) -> Result<Arc<TokenService<dyn RevocationStore>>, InfrastructureError> {
    let store = connect_revocation_store(config).await?;
    let service_config = TokenServiceConfig::from_settings(&config.auth.token, &config.revocation);

    let service = TokenService::new(store, service_config)
        .map_err(|e| InfrastructureError::Config(e.to_string()))?;
    Ok(Arc::new(service))
}
