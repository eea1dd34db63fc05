//! Grant-file authorization provider.
//!
//! The host requires a one-time authorization handshake before a user's
//! installation may send outbound requests or mail. The handshake is modeled
//! with a per-user grant marker at `<data_dir>/grants/<user>`: status is
//! `Required` until the grant is recorded, `NotRequired` afterwards. The
//! marker content is the grant timestamp, for operator forensics only.

use async_trait::async_trait;
use obn_core::framework::{AuthMode, AuthorizationProvider, AuthorizationStatus};
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Subdirectory of the data dir holding per-user grant markers.
pub const GRANTS_DIR: &str = "grants";

/// Errors that can occur while recording a grant.
#[derive(Debug, Error)]
pub enum GrantError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timestamp format error: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Authorization info for one user, backed by a grant marker file.
#[derive(Debug, Clone)]
pub struct GrantFileAuthorization {
    grant_path: PathBuf,
    mail_daily_quota: u32,
}

impl GrantFileAuthorization {
    /// Create a provider for one user under the given data directory.
    ///
    /// The caller must have validated `user` as a safe file-name component
    /// (see [`crate::api::extractors::UserScope`]).
    pub fn new(data_dir: &Path, user: &str, mail_daily_quota: u32) -> Self {
        Self {
            grant_path: data_dir.join(GRANTS_DIR).join(user),
            mail_daily_quota,
        }
    }

    /// Record the one-time grant for this user. Idempotent: an existing
    /// grant keeps its original timestamp.
    pub async fn record_grant(&self) -> Result<(), GrantError> {
        if tokio::fs::try_exists(&self.grant_path).await? {
            return Ok(());
        }

        if let Some(parent) = self.grant_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let granted_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
        tokio::fs::write(&self.grant_path, granted_at).await?;

        tracing::info!(path = %self.grant_path.display(), "authorization grant recorded");
        Ok(())
    }
}

#[async_trait]
impl AuthorizationProvider for GrantFileAuthorization {
    async fn authorization_status(&self, _mode: AuthMode) -> AuthorizationStatus {
        // Unreadable state counts as not yet granted
        match tokio::fs::try_exists(&self.grant_path).await {
            Ok(true) => AuthorizationStatus::NotRequired,
            _ => AuthorizationStatus::Required,
        }
    }

    async fn remaining_mail_quota(&self) -> Option<u32> {
        Some(self.mail_daily_quota)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("obn-grants-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn status_is_required_until_granted() {
        let dir = scratch_dir();
        let grants = GrantFileAuthorization::new(&dir, "operator", 100);

        let before = grants.authorization_status(AuthMode::Full).await;
        assert_eq!(before, AuthorizationStatus::Required);
        assert!(!before.is_granted());

        grants.record_grant().await.unwrap();

        let after = grants.authorization_status(AuthMode::Full).await;
        assert_eq!(after, AuthorizationStatus::NotRequired);
        assert!(after.is_granted());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn recording_a_grant_twice_keeps_the_first_marker() {
        let dir = scratch_dir();
        let grants = GrantFileAuthorization::new(&dir, "operator", 100);

        grants.record_grant().await.unwrap();
        let first = tokio::fs::read_to_string(dir.join(GRANTS_DIR).join("operator"))
            .await
            .unwrap();

        grants.record_grant().await.unwrap();
        let second = tokio::fs::read_to_string(dir.join(GRANTS_DIR).join("operator"))
            .await
            .unwrap();

        assert_eq!(first, second);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn quota_comes_from_configuration() {
        let grants = GrantFileAuthorization::new(Path::new("/nonexistent"), "operator", 0);
        assert_eq!(grants.remaining_mail_quota().await, Some(0));
    }
}
