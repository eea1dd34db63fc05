//! Notifier API handlers.
//!
//! All endpoints are scoped to an end-user via the `Obn-User` header.
//!
//! # Endpoints
//!
//! - `GET  /settings`      – seeded settings form + missing-required state
//! - `PUT  /settings`      – merge configuration values into the store
//! - `POST /submissions`   – form-submission trigger, runs the dispatcher
//! - `GET  /authorization` – current authorization status
//! - `POST /authorization` – record the one-time grant (idempotent)

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::grants::GrantError;
use crate::state::AppState;
use obn_core::framework::StoreError;

pub mod extractors;

mod authorize;
mod settings;
mod submit;

/// Build the notifier API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(settings::get_settings).put(settings::save_settings),
        )
        .route("/submissions", post(submit::handle_submission))
        .route(
            "/authorization",
            get(authorize::get_status).post(authorize::record_grant),
        )
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in API handlers.
#[derive(Debug)]
pub(crate) enum ApiError {
    /// The per-user property store failed.
    Store(StoreError),
    /// Recording a grant failed.
    Grant(GrantError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Store(e) => {
                tracing::error!(error = %e, "property store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            ApiError::Grant(e) => {
                tracing::error!(error = %e, "grant recording error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}
