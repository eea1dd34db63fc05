//! Collaborator seams between the decision flow and the host platform.
//!
//! The host's ambient services (property storage, authorization info, the
//! outbound HTTP fetch) are reached only through these traits; the decision
//! flow never touches a global. Concrete implementations live in the server
//! crate, except for the reqwest-backed notifier in
//! [`processors`](crate::processors).

use crate::config::Properties;
use async_trait::async_trait;
use obn_sdk::auth::ApiCredentials;
use obn_sdk::objects::ActivityEventPayload;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host capability mode being queried.
///
/// The submission flow always asks for [`AuthMode::Full`], the mode needed to
/// send outbound requests and mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Full access: outbound requests and mail.
    Full,
}

/// Authorization status reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationStatus {
    /// Authorization has not been granted yet; the owner must complete the
    /// handshake before anything can be sent.
    Required,
    /// Authorization has been granted.
    NotRequired,
    /// Any other host-defined status. Treated as granted.
    #[serde(other)]
    Other,
}

impl AuthorizationStatus {
    /// Whether the flow may proceed. Everything except [`Required`] counts
    /// as granted.
    ///
    /// [`Required`]: AuthorizationStatus::Required
    pub fn is_granted(self) -> bool {
        !matches!(self, AuthorizationStatus::Required)
    }

    /// The camelCase wire name of this status.
    pub fn name(self) -> &'static str {
        match self {
            AuthorizationStatus::Required => "required",
            AuthorizationStatus::NotRequired => "notRequired",
            AuthorizationStatus::Other => "other",
        }
    }
}

/// Error reported by a [`PropertyStore`] backend.
#[derive(Debug, Error)]
#[error("property store error: {0}")]
pub struct StoreError(#[from] pub anyhow::Error);

/// Per-user key/value persistence.
///
/// One read per operation; the decision flow loads the mapping once and
/// passes the value through the call chain.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Read the full stored mapping. An installation with nothing stored
    /// yields an empty mapping, not an error.
    async fn get_properties(&self) -> Result<Properties, StoreError>;

    /// Merge `update` into the stored mapping: keys in `update` overwrite
    /// stored keys, all other stored keys survive. Idempotent.
    async fn set_properties(&self, update: Properties) -> Result<(), StoreError>;
}

/// Host authorization info.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Current authorization status for the given capability mode.
    /// Re-queried on every submission; never cached by callers.
    async fn authorization_status(&self, mode: AuthMode) -> AuthorizationStatus;

    /// Remaining daily quota of the host's mail service, if the host
    /// reports one.
    async fn remaining_mail_quota(&self) -> Option<u32>;
}

/// Receipt for a completed outbound notification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// HTTP status code returned by the activity event endpoint.
    pub status: u16,
}

impl DeliveryReceipt {
    /// Whether the endpoint answered with a 2xx status.
    pub fn is_success(self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error raised while issuing the outbound notification request.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The configured API URL could not be parsed.
    #[error("invalid notification url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound notification dispatch to the external activity event API.
#[async_trait]
pub trait ActivityNotifier: Send + Sync {
    /// Issue a single notification request to `url`, authenticated with
    /// `credentials`. Returns the response status; the body is never
    /// interpreted.
    async fn send(
        &self,
        url: &str,
        credentials: &ApiCredentials,
        payload: &ActivityEventPayload,
    ) -> Result<DeliveryReceipt, NotifyError>;
}
