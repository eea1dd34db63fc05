//! Custom Axum extractors.
//!
//! Provides `UserScope`, which reads the `Obn-User` header and validates it
//! as a safe per-user scope. User ids become file names under the data
//! directory, so anything outside a conservative character set is rejected
//! before a path is ever built.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use obn_sdk::auth::USER_HEADER;

/// Maximum accepted length of a user id.
const MAX_USER_LEN: usize = 128;

/// The validated end-user scope of a request.
pub struct UserScope(pub String);

/// Errors returned by the [`UserScope`] extractor.
#[derive(Debug)]
pub enum UserScopeError {
    MissingHeader,
    InvalidUser,
}

impl IntoResponse for UserScopeError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UserScopeError::MissingHeader => {
                (StatusCode::BAD_REQUEST, "missing Obn-User header")
            }
            UserScopeError::InvalidUser => (StatusCode::BAD_REQUEST, "invalid Obn-User header"),
        };
        (status, message).into_response()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for UserScope {
    type Rejection = UserScopeError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_HEADER)
            .ok_or(UserScopeError::MissingHeader)?
            .to_str()
            .map_err(|_| UserScopeError::InvalidUser)?;

        if !is_valid_user(user) {
            return Err(UserScopeError::InvalidUser);
        }

        Ok(UserScope(user.to_owned()))
    }
}

/// Accepts ASCII alphanumerics plus `.`, `_`, `@`, `-`, rejecting anything
/// path-shaped.
fn is_valid_user(user: &str) -> bool {
    !user.is_empty()
        && user.len() <= MAX_USER_LEN
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_valid_user("operator"));
        assert!(is_valid_user("ada.lovelace@example.com"));
        assert!(is_valid_user("user_42-a"));
    }

    #[test]
    fn rejects_path_shaped_identifiers() {
        assert!(!is_valid_user(""));
        assert!(!is_valid_user("../etc/passwd"));
        assert!(!is_valid_user("a/b"));
        assert!(!is_valid_user("a\\b"));
        assert!(!is_valid_user("a b"));
        assert!(!is_valid_user(&"x".repeat(MAX_USER_LEN + 1)));
    }
}
