//! Wire payload for the external activity event API.

use serde::{Deserialize, Serialize};

/// The activity event forwarded to the external API on each submission.
///
/// Every field mirrors a stored configuration value and is forwarded
/// verbatim as a string. Keys absent from the configuration are omitted from
/// the wire entirely rather than sent as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEventPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date1: Option<String>,
}
