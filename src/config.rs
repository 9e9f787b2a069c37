// src/config.rs
//
// Configuration loaded from environment variables.
//
// Variables (all optional):
// - FILMGRAPH_STORAGE  - "sqlite" (default) or "memory"
// - FILMGRAPH_DB_PATH  - SQLite file path (default: filmgraph.db)
// - HOST               - Bind address (default: 127.0.0.1)
// - PORT               - Listen port (default: 8080)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which storage backend to wire at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl StorageBackend {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "sqlite" => Some(Self::Sqlite),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend selection
    pub storage: StorageBackend,
    /// SQLite database file path, unused by the memory backend
    pub db_path: PathBuf,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let raw_storage = get_env_or_default("FILMGRAPH_STORAGE", "sqlite");
        let storage = StorageBackend::from_label(&raw_storage).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "FILMGRAPH_STORAGE".to_string(),
                format!("expected \"sqlite\" or \"memory\", got \"{}\"", raw_storage),
            )
        })?;

        let db_path = PathBuf::from(get_env_or_default("FILMGRAPH_DB_PATH", "filmgraph.db"));

        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        Ok(Self {
            storage,
            db_path,
            host,
            port,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
