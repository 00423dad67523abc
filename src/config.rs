//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::FieldPolicy;

/// Storage adapter selected by the `DATABASE_URL` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// `postgres://` or `postgresql://` URLs.
    Postgres,
    /// `sqlite:` URLs, including `sqlite::memory:`.
    Sqlite,
    /// The literal `memory`: process-local, nothing survives a restart.
    Memory,
}

impl StorageBackend {
    /// Infers the backend from a connection URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedDatabaseUrl`] when the scheme is
    /// not one of `postgres`, `postgresql`, `sqlite` or `memory`.
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        if url == "memory" {
            Ok(Self::Memory)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            Err(ConfigError::UnsupportedDatabaseUrl(redact(url)))
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
        })
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Configuration failures detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is set but is not a socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        /// Raw value from the environment.
        value: String,
        /// Parser error.
        source: std::net::AddrParseError,
    },

    /// `DATABASE_URL` uses a scheme no adapter handles.
    #[error("unsupported DATABASE_URL scheme: {0}")]
    UnsupportedDatabaseUrl(String),
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Database connection string.
    pub database_url: String,

    /// Adapter derived from `database_url`.
    pub storage_backend: StorageBackend,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Upper bound on handling a single HTTP request, in seconds.
    pub request_timeout_secs: u64,

    /// Which enrollment payloads are accepted.
    pub field_policy: FieldPolicy,

    /// Log line format.
    pub log_format: LogFormat,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `LISTEN_ADDR` is set but cannot be
    /// parsed, or if `DATABASE_URL` names an unsupported store.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let listen_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
        let storage_backend = StorageBackend::from_url(&database_url)?;

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            database_url,
            storage_backend,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
            database_min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 1),
            database_connect_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            field_policy: FieldPolicy::from_require_fields(parse_env_bool(
                "ENROLLMENT_REQUIRE_FIELDS",
                false,
            )),
            log_format,
        })
    }

    /// Connection acquire timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.database_connect_timeout_secs)
    }

    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite::memory:".to_string(),
            storage_backend: StorageBackend::Sqlite,
            database_max_connections: 10,
            database_min_connections: 1,
            database_connect_timeout_secs: 5,
            request_timeout_secs: 30,
            field_policy: FieldPolicy::Permissive,
            log_format: LogFormat::Text,
        }
    }
}

// Credentials in `database_url` must not reach the logs.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("listen_addr", &self.listen_addr)
            .field("database_url", &redact(&self.database_url))
            .field("storage_backend", &self.storage_backend)
            .field("database_max_connections", &self.database_max_connections)
            .field("database_min_connections", &self.database_min_connections)
            .field(
                "database_connect_timeout_secs",
                &self.database_connect_timeout_secs,
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("field_policy", &self.field_policy)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Replaces the `user:password@` part of a URL with `***@`.
fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let (scheme, _) = url.split_at(scheme_end + 3);
            let (_, host) = url.split_at(at);
            format!("{scheme}***{host}")
        }
        _ => url.to_string(),
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn backend_from_url_scheme() {
        assert!(matches!(
            StorageBackend::from_url("postgres://u:p@localhost/db"),
            Ok(StorageBackend::Postgres)
        ));
        assert!(matches!(
            StorageBackend::from_url("postgresql://localhost/db"),
            Ok(StorageBackend::Postgres)
        ));
        assert!(matches!(
            StorageBackend::from_url("sqlite::memory:"),
            Ok(StorageBackend::Sqlite)
        ));
        assert!(matches!(
            StorageBackend::from_url("memory"),
            Ok(StorageBackend::Memory)
        ));
    }

    #[test]
    fn unsupported_scheme_is_rejected_without_credentials() {
        let Err(err) = StorageBackend::from_url("mysql://root:hunter2@db/app") else {
            panic!("mysql should be rejected");
        };
        let message = err.to_string();
        assert!(message.contains("mysql://***@db/app"));
        assert!(!message.contains("hunter2"));
    }

    #[test]
    fn redact_leaves_plain_urls_alone() {
        assert_eq!(redact("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(redact("postgres://localhost/db"), "postgres://localhost/db");
    }

    #[test]
    fn debug_output_hides_password() {
        let config = GatewayConfig {
            database_url: "postgres://app:secret@db:5432/enrollments".to_string(),
            storage_backend: StorageBackend::Postgres,
            ..GatewayConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("***@db:5432/enrollments"));
    }

    #[test]
    fn defaults_are_permissive_in_memory_sqlite() {
        let config = GatewayConfig::default();
        assert_eq!(config.storage_backend, StorageBackend::Sqlite);
        assert_eq!(config.field_policy, FieldPolicy::Permissive);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
