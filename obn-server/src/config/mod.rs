//! Configuration module for obn-server.
//!
//! Handles loading configuration from the TOML file and CLI arguments, and
//! holds the shared runtime configuration behind per-section locks.

pub mod file;

use crate::config::file::{AuthorizationConfig, FileConfig, NotifierConfig, ServerConfig, StorageConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all sections.
pub struct LoadedConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub authorization: AuthorizationConfig,
    pub notifier: NotifierConfig,
}

impl LoadedConfig {
    /// Convert into a SharedConfig with Arc<RwLock<T>> wrappers.
    pub fn into_shared(self) -> SharedConfig {
        SharedConfig {
            server: Arc::new(RwLock::new(self.server)),
            storage: Arc::new(RwLock::new(self.storage)),
            authorization: Arc::new(RwLock::new(self.authorization)),
            notifier: Arc::new(RwLock::new(self.notifier)),
        }
    }
}

/// Shared configuration state with separate locks for each section.
///
/// This allows independent access to different configuration sections
/// without blocking other readers/writers.
#[derive(Clone)]
pub struct SharedConfig {
    /// Server configuration (listen address; rebinding requires a restart).
    pub server: Arc<RwLock<ServerConfig>>,
    /// Storage configuration (per-user state root).
    pub storage: Arc<RwLock<StorageConfig>>,
    /// Authorization configuration (mail quota).
    pub authorization: Arc<RwLock<AuthorizationConfig>>,
    /// Outbound notifier configuration (applied at startup).
    pub notifier: Arc<RwLock<NotifierConfig>>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    listen_override: Option<SocketAddr>,
    data_dir_override: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(
        config_path: impl AsRef<Path>,
        listen_override: Option<SocketAddr>,
        data_dir_override: Option<PathBuf>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
            data_dir_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        let mut file_config: FileConfig = toml::from_str(&config_content)?;

        if let Some(listen) = self.listen_override {
            file_config.server.listen = listen;
        }
        if let Some(data_dir) = &self.data_dir_override {
            file_config.storage.data_dir = data_dir.clone();
        }

        self.validate(&file_config)?;

        Ok(LoadedConfig {
            server: file_config.server,
            storage: file_config.storage,
            authorization: file_config.authorization,
            notifier: file_config.notifier,
        })
    }

    /// Reload the configuration (used during SIGHUP).
    pub fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.load()
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        if config.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.data_dir must not be empty".to_string(),
            ));
        }
        if config.notifier.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "notifier.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
