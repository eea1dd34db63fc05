//! TOML file configuration structures.
//!
//! These structs directly map to the `obn-config.toml` file format. Every
//! section has defaults so a minimal file only names what it changes.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub authorization: AuthorizationConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("valid default address")
}

/// Storage configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for per-user state (properties, grants).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./obn-data")
}

/// Authorization configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationConfig {
    /// Daily mail quota reported for this host. Hosts without a mail
    /// allowance set this to zero.
    #[serde(default = "default_mail_daily_quota")]
    pub mail_daily_quota: u32,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            mail_daily_quota: default_mail_daily_quota(),
        }
    }
}

fn default_mail_daily_quota() -> u32 {
    100
}

/// Outbound notifier configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Timeout for the outbound activity event request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[storage]
data_dir = "/var/lib/obn"

[authorization]
mail_daily_quota = 0

[notifier]
request_timeout_secs = 10
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.storage.data_dir, PathBuf::from("/var/lib/obn"));
        assert_eq!(config.authorization.mail_daily_quota, 0);
        assert_eq!(config.notifier.request_timeout_secs, 10);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.storage.data_dir, PathBuf::from("./obn-data"));
        assert_eq!(config.authorization.mail_daily_quota, 100);
        assert_eq!(config.notifier.request_timeout_secs, 30);
    }
}
