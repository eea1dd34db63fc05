//! Submission trigger and authorization API types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The trigger record delivered by the form host on each submission.
///
/// Carries identifiers only; the notifier reads the stored configuration,
/// never submission content. Every field is optional so a bare trigger with
/// an empty body still dispatches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEvent {
    /// Identifier of the form instance the trigger fired for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    /// Identifier of the individual response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    /// When the end-user submitted, as reported by the host.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub submitted_at: Option<OffsetDateTime>,
}

/// Response of `POST /api/v1/submissions`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SubmitAck {
    /// Whether the activity event was forwarded to the external API.
    pub forwarded: bool,
}

/// Response of the authorization endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationView {
    /// Current authorization status, `"required"` or `"notRequired"`.
    pub status: String,
    /// Remaining daily mail quota reported by the host, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_mail_quota: Option<u32>,
}
