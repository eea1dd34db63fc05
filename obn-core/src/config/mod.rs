//! Per-user configuration model.
//!
//! The stored configuration is a flat string-to-string mapping. These types
//! carry it through the decision flow; loading and persistence are handled by
//! the [`PropertyStore`](crate::framework::PropertyStore) collaborator.

mod properties;
mod template;

pub use properties::{
    KEY_ACTIVITY_ID, KEY_ACTIVITY_TIME, KEY_API_KEY, KEY_API_URL, KEY_AUTH_TOKEN, KEY_DATE1,
    KEY_EMAIL, KEY_FIRST_NAME, KEY_INT1, KEY_INT2, KEY_LAST_NAME, KEY_TEXT1, KEY_TEXT2,
    KEY_USER_ID, Properties, REQUIRED_PROPERTIES, has_required_properties, missing_properties,
};
pub use template::bind_properties;
