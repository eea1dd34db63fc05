//! Form-submission trigger handler.

use super::extractors::UserScope;
use axum::{Json, extract::State};
use obn_core::processors::SubmissionDispatcher;
use obn_sdk::objects::{SubmissionEvent, SubmitAck};
use uuid::Uuid;

use crate::state::AppState;

/// `POST /api/v1/submissions` – run the decision flow for one submission.
///
/// The body is optional; a bare trigger dispatches like any other. The
/// response is an acknowledgement only: every failure path inside the flow
/// is logged and folded into the `forwarded` flag, never an error status.
pub async fn handle_submission(
    State(state): State<AppState>,
    user: UserScope,
    body: Option<Json<SubmissionEvent>>,
) -> Json<SubmitAck> {
    let event = body.map(|Json(event)| event).unwrap_or_default();
    let dispatch_id = Uuid::new_v4();

    tracing::info!(
        %dispatch_id,
        user = %user.0,
        form_id = event.form_id.as_deref(),
        "form submission received"
    );

    let dispatcher = SubmissionDispatcher::new(
        state.store_for(&user.0).await,
        state.grants_for(&user.0).await,
        state.notifier.clone(),
    );

    let outcome = dispatcher.handle_submission(&event).await;

    tracing::info!(
        %dispatch_id,
        user = %user.0,
        forwarded = outcome.forwarded(),
        "form submission handled"
    );

    Json(SubmitAck {
        forwarded: outcome.forwarded(),
    })
}
