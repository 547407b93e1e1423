use sea_orm::DatabaseConnection;

use cla_core::db::PoolSettings;

use crate::config::ManagerConfig;
use crate::infra::db::{DbRosterStore, DbVerificationCodeRepository};

/// Shared state handed to the API layer: one pool plus the loaded config.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: ManagerConfig,
}

impl AppState {
    pub async fn connect(config: ManagerConfig) -> anyhow::Result<Self> {
        let settings = PoolSettings {
            max_connections: config.database_max_connections,
            ..PoolSettings::default()
        };
        let db = cla_core::db::connect(&config.database_url, &settings).await?;
        Ok(Self { db, config })
    }

    pub fn roster_store(&self) -> DbRosterStore {
        DbRosterStore {
            db: self.db.clone(),
        }
    }

    pub fn verification_code_repo(&self) -> DbVerificationCodeRepository {
        DbVerificationCodeRepository {
            db: self.db.clone(),
        }
    }
}
