//! The stored configuration mapping and the required-key check.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored key for the activity event API base URL.
pub const KEY_API_URL: &str = "apiUrl";
/// Stored key for the bearer token.
pub const KEY_AUTH_TOKEN: &str = "authToken";
/// Stored key for the API key.
pub const KEY_API_KEY: &str = "apiKey";
/// Stored key for the activity identifier sent with each event.
pub const KEY_ACTIVITY_ID: &str = "activityId";
/// Stored key for the activity time sent with each event.
pub const KEY_ACTIVITY_TIME: &str = "activityTime";
/// Stored key for the user identifier sent with each event.
pub const KEY_USER_ID: &str = "userId";
/// Stored key for the first free-text field.
pub const KEY_TEXT1: &str = "text1";
/// Stored key for the second free-text field.
pub const KEY_TEXT2: &str = "text2";
/// Stored key for the email field.
pub const KEY_EMAIL: &str = "email";
/// Stored key for the first-name field.
pub const KEY_FIRST_NAME: &str = "firstName";
/// Stored key for the last-name field.
pub const KEY_LAST_NAME: &str = "lastName";
/// Stored key for the first integer field.
pub const KEY_INT1: &str = "int1";
/// Stored key for the second integer field.
pub const KEY_INT2: &str = "int2";
/// Stored key for the date field.
pub const KEY_DATE1: &str = "date1";

/// Keys that must be stored before a submission may be forwarded.
///
/// Presence is all that is required; an empty string value counts.
pub const REQUIRED_PROPERTIES: &[&str] = &[KEY_API_URL, KEY_AUTH_TOKEN, KEY_API_KEY];

/// The per-user configuration mapping.
///
/// Values are always strings; a key is either present or absent. Absence is
/// distinct from the empty string here, and collapses to the empty string
/// only when the mapping is bound to a settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    /// An empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a stored value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a key is stored, regardless of its value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Store a value, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Merge `update` into this mapping: keys in `update` overwrite stored
    /// keys, all other stored keys survive.
    pub fn merge(&mut self, update: Properties) {
        self.0.extend(update.0);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Properties {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Check that every key in `required` is stored in `properties`.
///
/// Value content is irrelevant; evaluation short-circuits on the first
/// missing key.
pub fn has_required_properties(properties: &Properties, required: &[&str]) -> bool {
    required.iter().all(|key| properties.contains_key(key))
}

/// The subset of `required` that is not stored in `properties`, in the order
/// given.
pub fn missing_properties(properties: &Properties, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|key| !properties.contains_key(key))
        .map(|key| (*key).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_required_key_fails_the_check() {
        let properties = props(&[("A", "1"), ("B", "2")]);
        assert!(!has_required_properties(&properties, &["A", "B", "C"]));
    }

    #[test]
    fn all_required_keys_present_passes_the_check() {
        let properties = props(&[("A", "1"), ("B", "2"), ("C", "3")]);
        assert!(has_required_properties(&properties, &["A", "B", "C"]));
    }

    #[test]
    fn empty_string_values_count_as_present() {
        let properties = props(&[(KEY_API_URL, ""), (KEY_AUTH_TOKEN, ""), (KEY_API_KEY, "")]);
        assert!(has_required_properties(&properties, REQUIRED_PROPERTIES));
    }

    #[test]
    fn empty_required_set_always_passes() {
        assert!(has_required_properties(&Properties::new(), &[]));
    }

    #[test]
    fn missing_properties_lists_only_absent_keys() {
        let properties = props(&[(KEY_API_URL, "https://example.com")]);
        assert_eq!(
            missing_properties(&properties, REQUIRED_PROPERTIES),
            vec![KEY_AUTH_TOKEN.to_string(), KEY_API_KEY.to_string()]
        );
    }

    #[test]
    fn merge_overwrites_and_preserves() {
        let mut stored = props(&[("apiKey", "old"), ("text1", "kept")]);
        stored.merge(props(&[("apiKey", "new"), ("email", "a@b.c")]));

        assert_eq!(stored.get("apiKey"), Some("new"));
        assert_eq!(stored.get("text1"), Some("kept"));
        assert_eq!(stored.get("email"), Some("a@b.c"));
        assert_eq!(stored.len(), 3);
    }
}
