pub mod activity;
pub mod settings;
pub mod submit;

pub use activity::ActivityEventPayload;
pub use settings::{SettingsForm, SettingsUpdate, SettingsView};
pub use submit::{AuthorizationView, SubmissionEvent, SubmitAck};
