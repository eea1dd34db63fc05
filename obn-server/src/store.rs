//! JSON-file-backed property store.
//!
//! Each end-user's configuration lives in one flat JSON object at
//! `<data_dir>/properties/<user>.json`. A missing file reads as an empty
//! mapping. Writes go through a temp file and rename so a crash never leaves
//! a half-written store. The host serializes operator writes per user, so no
//! file locking is needed here.

use async_trait::async_trait;
use obn_core::config::Properties;
use obn_core::framework::{PropertyStore, StoreError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Subdirectory of the data dir holding per-user property files.
pub const PROPERTIES_DIR: &str = "properties";

#[derive(Debug, Error)]
enum StoreIoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt property file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-user property store over a JSON file.
#[derive(Debug, Clone)]
pub struct JsonPropertyStore {
    path: PathBuf,
}

impl JsonPropertyStore {
    /// Create a store for one user under the given data directory.
    ///
    /// The caller must have validated `user` as a safe file-name component
    /// (see [`crate::api::extractors::UserScope`]).
    pub fn new(data_dir: &Path, user: &str) -> Self {
        Self {
            path: data_dir.join(PROPERTIES_DIR).join(format!("{user}.json")),
        }
    }

    async fn read(&self) -> Result<Properties, StoreIoError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Properties::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, properties: &Properties) -> Result<(), StoreIoError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(properties)?;

        // Write atomically: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await?;
        tokio::fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl PropertyStore for JsonPropertyStore {
    async fn get_properties(&self) -> Result<Properties, StoreError> {
        self.read().await.map_err(|e| StoreError(e.into()))
    }

    async fn set_properties(&self, update: Properties) -> Result<(), StoreError> {
        let mut stored = self.read().await.map_err(|e| StoreError(e.into()))?;
        stored.merge(update);
        self.write(&stored).await.map_err(|e| StoreError(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("obn-store-test-{}", Uuid::new_v4()))
    }

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_mapping() {
        let dir = scratch_dir();
        let store = JsonPropertyStore::new(&dir, "nobody");

        let properties = store.get_properties().await.unwrap();
        assert!(properties.is_empty());
    }

    #[tokio::test]
    async fn save_merges_with_existing_values() {
        let dir = scratch_dir();
        let store = JsonPropertyStore::new(&dir, "operator");

        store
            .set_properties(props(&[("apiUrl", "https://a.example"), ("text1", "keep")]))
            .await
            .unwrap();
        store
            .set_properties(props(&[("apiUrl", "https://b.example"), ("apiKey", "k")]))
            .await
            .unwrap();

        let stored = store.get_properties().await.unwrap();
        assert_eq!(stored.get("apiUrl"), Some("https://b.example"));
        assert_eq!(stored.get("text1"), Some("keep"));
        assert_eq!(stored.get("apiKey"), Some("k"));

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn saving_the_same_update_twice_is_idempotent() {
        let dir = scratch_dir();
        let store = JsonPropertyStore::new(&dir, "operator");
        let update = props(&[("apiUrl", "https://a.example"), ("authToken", "t")]);

        store.set_properties(update.clone()).await.unwrap();
        let once = store.get_properties().await.unwrap();

        store.set_properties(update).await.unwrap();
        let twice = store.get_properties().await.unwrap();

        assert_eq!(once, twice);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn users_do_not_share_state() {
        let dir = scratch_dir();
        let alice = JsonPropertyStore::new(&dir, "alice");
        let bob = JsonPropertyStore::new(&dir, "bob");

        alice
            .set_properties(props(&[("apiKey", "alice-key")]))
            .await
            .unwrap();

        assert!(bob.get_properties().await.unwrap().is_empty());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
