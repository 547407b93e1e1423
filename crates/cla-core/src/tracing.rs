use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the stdout subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One JSON object per event. Used in deployed environments.
    #[default]
    Json,
    /// Human-readable single-line output for local runs.
    Compact,
}

impl LogFormat {
    /// Parse the `LOG_FORMAT` env value. Unknown values fall back to JSON.
    pub fn from_env_value(v: Option<&str>) -> Self {
        match v.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("compact") => Self::Compact,
            _ => Self::Json,
        }
    }
}

/// Filter used when `RUST_LOG` is unset. sqlx statement logs are noisy at info.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn,sea_orm=warn";

/// Initialize structured stdout tracing. Call once at process startup.
/// Honors `RUST_LOG`; falls back to [`DEFAULT_DIRECTIVES`].
///
/// Safe to call multiple times: subsequent calls are silently ignored.
pub fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let registry = tracing_subscriber::registry().with(filter);
    let _ = match format {
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
    };
}
