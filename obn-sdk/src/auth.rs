//! Authentication material for the activity event API.
//!
//! The external API authenticates each request with a bearer token plus an
//! API key header. Both values are opaque to this crate; they are stored by
//! the operator and forwarded verbatim.

/// Header carrying the end-user scope on requests to the notifier API.
pub const USER_HEADER: &str = "Obn-User";

/// Header carrying the API key on outbound activity event requests.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Credentials attached to outbound activity event requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    /// Bearer token for the `Authorization` header.
    pub auth_token: String,
    /// Value of the [`API_KEY_HEADER`] header.
    pub api_key: String,
}

impl ApiCredentials {
    /// Create credentials from the stored token and key.
    pub fn new(auth_token: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            api_key: api_key.into(),
        }
    }

    /// The `Authorization` header value for these credentials.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }
}
