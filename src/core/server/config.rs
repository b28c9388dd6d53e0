//! Server configuration.

use crate::core::error::{Result, StaggerError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Configuration for the HTTP server.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "port": 9090, "seed_path": "data/model.json" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request bodies above this size are rejected before decoding.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Optional JSON snapshot loaded into the model at start-up.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_log_filter() -> String {
    "stagger=info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            log_filter: default_log_filter(),
            seed_path: None,
        }
    }
}

impl ServerConfig {
    /// Load config from a JSON file. A missing file yields the defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(ServerConfig::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content)
            .map_err(|e| StaggerError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| StaggerError::Config(format!("invalid bind address {}: {}", addr, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.log_filter, "stagger=info");
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"port": 9090}"#).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_bind_addr_rejects_hostname() {
        let config = ServerConfig {
            host: "not a host".into(),
            ..Default::default()
        };
        assert!(matches!(config.bind_addr(), Err(StaggerError::Config(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stagger.json");
        std::fs::write(&path, r#"{"host": "127.0.0.1", "seed_path": "seed.json"}"#).unwrap();

        let config = ServerConfig::load(&path).await.unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.seed_path, Some(PathBuf::from("seed.json")));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stagger.json");
        std::fs::write(&path, "port = 1").unwrap();

        let err = ServerConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, StaggerError::Config(_)));
    }
}
