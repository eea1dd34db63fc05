//! Authorization handshake handlers.

use super::ApiError;
use super::extractors::UserScope;
use axum::{Json, extract::State};
use obn_core::framework::{AuthMode, AuthorizationProvider};
use obn_sdk::objects::AuthorizationView;

use crate::grants::GrantFileAuthorization;
use crate::state::AppState;

/// `GET /api/v1/authorization` – current status for the user.
pub async fn get_status(
    State(state): State<AppState>,
    user: UserScope,
) -> Result<Json<AuthorizationView>, ApiError> {
    let grants = state.grants_for(&user.0).await;
    Ok(Json(view(&grants).await))
}

/// `POST /api/v1/authorization` – record the one-time grant. Idempotent.
pub async fn record_grant(
    State(state): State<AppState>,
    user: UserScope,
) -> Result<Json<AuthorizationView>, ApiError> {
    let grants = state.grants_for(&user.0).await;
    grants.record_grant().await.map_err(ApiError::Grant)?;

    Ok(Json(view(&grants).await))
}

async fn view(grants: &GrantFileAuthorization) -> AuthorizationView {
    let status = grants.authorization_status(AuthMode::Full).await;
    AuthorizationView {
        status: status.name().to_string(),
        remaining_mail_quota: grants.remaining_mail_quota().await,
    }
}
