//! Settings API types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The settings form as presented to the operator.
///
/// Fourteen fixed fields, each seeded from the stored configuration with
/// absent keys collapsed to the empty string. `open_badges_url` is seeded
/// from the stored `apiUrl` key; every other field is seeded from the
/// identically-named key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub open_badges_url: String,
    pub api_key: String,
    pub auth_token: String,
    pub activity_id: String,
    pub activity_time: String,
    pub user_id: String,
    pub text1: String,
    pub text2: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub int1: String,
    pub int2: String,
    pub date1: String,
}

/// Response of `GET /api/v1/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    /// The seeded settings form.
    pub form: SettingsForm,
    /// Required configuration keys that are not yet stored.
    pub missing_required: Vec<String>,
}

/// Body of `PUT /api/v1/settings`: a flat map of configuration keys to
/// string values, merged over the stored configuration.
pub type SettingsUpdate = BTreeMap<String, String>;
