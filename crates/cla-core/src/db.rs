use std::time::Duration;

use anyhow::Context as _;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Pool settings for the PostgreSQL connection.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Open a pooled connection. sqlx statement logs are left on; the default
/// tracing filter keeps them at warn.
pub async fn connect(
    database_url: &str,
    settings: &PoolSettings,
) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(database_url.to_owned());
    opts.max_connections(settings.max_connections)
        .connect_timeout(settings.connect_timeout)
        .sqlx_logging(true);
    let db = Database::connect(opts)
        .await
        .context("connect to database")?;
    tracing::info!(
        max_connections = settings.max_connections,
        "database pool ready"
    );
    Ok(db)
}
