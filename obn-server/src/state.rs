//! Application state shared across all request handlers.

use crate::config::SharedConfig;
use crate::grants::GrantFileAuthorization;
use crate::store::JsonPropertyStore;
use obn_core::processors::HttpActivityNotifier;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (config sections are behind
/// Arc, the notifier's HTTP client is internally reference-counted).
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
    /// Outbound activity event notifier.
    pub notifier: HttpActivityNotifier,
}

impl AppState {
    /// Create a new AppState with the given configuration and notifier.
    pub fn new(config: SharedConfig, notifier: HttpActivityNotifier) -> Self {
        Self { config, notifier }
    }

    /// The property store scoped to one user.
    pub async fn store_for(&self, user: &str) -> JsonPropertyStore {
        let storage = self.config.storage.read().await;
        JsonPropertyStore::new(&storage.data_dir, user)
    }

    /// The authorization provider scoped to one user.
    pub async fn grants_for(&self, user: &str) -> GrantFileAuthorization {
        let storage = self.config.storage.read().await;
        let authorization = self.config.authorization.read().await;
        GrantFileAuthorization::new(&storage.data_dir, user, authorization.mail_daily_quota)
    }
}
