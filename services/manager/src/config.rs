use anyhow::{Context as _, anyhow};
use chrono::Duration;

use cla_core::tracing::LogFormat;

use crate::domain::types::{DEFAULT_CORPORATION_MANAGER_NUMBER, DEFAULT_VERIFICATION_CODE_TTL_SECS};

/// Manager service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// Verification code lifetime in seconds (default 300). Env var: `VERIFICATION_CODE_EXPIRY`.
    pub verification_code_expiry_secs: i64,
    /// Default manager quota per link (default 5). Env var: `CORPORATION_MANAGER_NUMBER`.
    pub corporation_manager_number: usize,
    /// Connection pool size (default 10). Env var: `DATABASE_MAX_CONNECTIONS`.
    pub database_max_connections: u32,
    /// `json` or `compact` (default json). Env var: `LOG_FORMAT`.
    pub log_format: LogFormat,
}

impl ManagerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Unparseable numbers are errors;
    /// only absent optional keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL is not set")?;

        let verification_code_expiry_secs = parse_or(
            &lookup,
            "VERIFICATION_CODE_EXPIRY",
            DEFAULT_VERIFICATION_CODE_TTL_SECS,
        )?;
        if verification_code_expiry_secs <= 0 {
            return Err(anyhow!(
                "VERIFICATION_CODE_EXPIRY must be positive, got {verification_code_expiry_secs}"
            ));
        }

        Ok(Self {
            database_url,
            verification_code_expiry_secs,
            corporation_manager_number: parse_or(
                &lookup,
                "CORPORATION_MANAGER_NUMBER",
                DEFAULT_CORPORATION_MANAGER_NUMBER,
            )?,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            log_format: LogFormat::from_env_value(lookup("LOG_FORMAT").as_deref()),
        })
    }

    pub fn verification_code_ttl(&self) -> Duration {
        Duration::seconds(self.verification_code_expiry_secs)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw:?}")),
        None => Ok(default),
    }
}
