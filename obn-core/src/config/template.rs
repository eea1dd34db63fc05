//! Binding stored configuration onto the settings form.

use super::properties::{
    KEY_ACTIVITY_ID, KEY_ACTIVITY_TIME, KEY_API_KEY, KEY_API_URL, KEY_AUTH_TOKEN, KEY_DATE1,
    KEY_EMAIL, KEY_FIRST_NAME, KEY_INT1, KEY_INT2, KEY_LAST_NAME, KEY_TEXT1, KEY_TEXT2,
    KEY_USER_ID, Properties,
};
use obn_sdk::objects::SettingsForm;

/// Project the stored configuration onto the fourteen settings-form fields.
///
/// Absent keys become the empty string so the form never carries a null.
/// The `openBadgesUrl` field is seeded from the stored `apiUrl` key; every
/// other field is seeded from the identically-named key.
pub fn bind_properties(properties: &Properties) -> SettingsForm {
    let field = |key: &str| properties.get(key).unwrap_or_default().to_string();

    SettingsForm {
        open_badges_url: field(KEY_API_URL),
        api_key: field(KEY_API_KEY),
        auth_token: field(KEY_AUTH_TOKEN),
        activity_id: field(KEY_ACTIVITY_ID),
        activity_time: field(KEY_ACTIVITY_TIME),
        user_id: field(KEY_USER_ID),
        text1: field(KEY_TEXT1),
        text2: field(KEY_TEXT2),
        email: field(KEY_EMAIL),
        first_name: field(KEY_FIRST_NAME),
        last_name: field(KEY_LAST_NAME),
        int1: field(KEY_INT1),
        int2: field(KEY_INT2),
        date1: field(KEY_DATE1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_configuration_binds_all_fields_to_empty_strings() {
        let form = bind_properties(&Properties::new());
        assert_eq!(form, SettingsForm::default());
    }

    #[test]
    fn api_url_seeds_the_open_badges_url_field() {
        let mut properties = Properties::new();
        properties.insert(KEY_API_URL, "Test");

        let form = bind_properties(&properties);
        assert_eq!(form.open_badges_url, "Test");
    }

    #[test]
    fn identically_named_keys_seed_their_fields() {
        let mut properties = Properties::new();
        properties.insert(KEY_API_KEY, "key");
        properties.insert(KEY_AUTH_TOKEN, "token");
        properties.insert(KEY_FIRST_NAME, "Ada");
        properties.insert(KEY_INT1, "7");
        properties.insert(KEY_DATE1, "2024-05-01");

        let form = bind_properties(&properties);
        assert_eq!(form.api_key, "key");
        assert_eq!(form.auth_token, "token");
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.int1, "7");
        assert_eq!(form.date1, "2024-05-01");
        // untouched fields stay empty
        assert_eq!(form.text2, "");
        assert_eq!(form.email, "");
    }
}
