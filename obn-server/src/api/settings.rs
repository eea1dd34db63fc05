//! Settings API handlers.

use super::ApiError;
use super::extractors::UserScope;
use axum::{Json, extract::State, http::StatusCode};
use obn_core::config::{Properties, REQUIRED_PROPERTIES, bind_properties, missing_properties};
use obn_core::framework::PropertyStore;
use obn_sdk::objects::{SettingsUpdate, SettingsView};

use crate::state::AppState;

/// `GET /api/v1/settings` – load the user's configuration once, bind the
/// settings form, and report which required keys are still missing.
pub async fn get_settings(
    State(state): State<AppState>,
    user: UserScope,
) -> Result<Json<SettingsView>, ApiError> {
    let store = state.store_for(&user.0).await;
    let properties = store.get_properties().await.map_err(ApiError::Store)?;

    Ok(Json(SettingsView {
        form: bind_properties(&properties),
        missing_required: missing_properties(&properties, REQUIRED_PROPERTIES),
    }))
}

/// `PUT /api/v1/settings` – persist the submitted values verbatim, merging
/// with the stored configuration.
pub async fn save_settings(
    State(state): State<AppState>,
    user: UserScope,
    Json(update): Json<SettingsUpdate>,
) -> Result<StatusCode, ApiError> {
    let store = state.store_for(&user.0).await;
    store
        .set_properties(Properties::from(update))
        .await
        .map_err(ApiError::Store)?;

    tracing::info!(user = %user.0, "configuration saved");
    Ok(StatusCode::NO_CONTENT)
}
