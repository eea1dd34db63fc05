//! The submission-handling decision flow.
//!
//! Each form submission runs authorization check → required-property
//! validation → outbound dispatch, in that order, and terminates in exactly
//! one of three states. All failures are handled here; nothing propagates to
//! the host as a fault.

use crate::config::{
    KEY_ACTIVITY_ID, KEY_ACTIVITY_TIME, KEY_API_KEY, KEY_API_URL, KEY_AUTH_TOKEN, KEY_DATE1,
    KEY_EMAIL, KEY_FIRST_NAME, KEY_INT1, KEY_INT2, KEY_LAST_NAME, KEY_TEXT1, KEY_TEXT2,
    KEY_USER_ID, Properties, REQUIRED_PROPERTIES, has_required_properties, missing_properties,
};
use crate::framework::{ActivityNotifier, AuthMode, AuthorizationProvider, PropertyStore};
use obn_sdk::auth::ApiCredentials;
use obn_sdk::objects::{ActivityEventPayload, SubmissionEvent};
use tracing::{error, info, warn};

/// Terminal state of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The notification request was issued.
    Dispatched,
    /// Authorization is still required; nothing was sent.
    AbortedAuthorization,
    /// Required configuration keys are missing; nothing was sent.
    AbortedProperties,
}

impl SubmissionOutcome {
    /// Whether the activity event was forwarded.
    pub fn forwarded(self) -> bool {
        matches!(self, SubmissionOutcome::Dispatched)
    }
}

/// Runs the decision flow for one submission.
///
/// Built per event from the collaborators scoped to the submitting user;
/// holds no state across submissions and re-queries the host on every run.
pub struct SubmissionDispatcher<P, A, N> {
    store: P,
    auth: A,
    notifier: N,
}

impl<P, A, N> SubmissionDispatcher<P, A, N>
where
    P: PropertyStore,
    A: AuthorizationProvider,
    N: ActivityNotifier,
{
    /// Create a dispatcher over the given collaborators.
    pub fn new(store: P, auth: A, notifier: N) -> Self {
        Self {
            store,
            auth,
            notifier,
        }
    }

    /// Handle one form submission to completion.
    ///
    /// Never fails from the caller's perspective: every failure path ends in
    /// an aborted outcome and a log entry.
    pub async fn handle_submission(&self, event: &SubmissionEvent) -> SubmissionOutcome {
        let status = self.auth.authorization_status(AuthMode::Full).await;
        if !status.is_granted() {
            self.on_authorization_required().await;
            return SubmissionOutcome::AbortedAuthorization;
        }

        let properties = match self.store.get_properties().await {
            Ok(properties) => properties,
            Err(e) => {
                warn!(
                    error = %e,
                    "failed to load configuration; submission not forwarded"
                );
                return SubmissionOutcome::AbortedProperties;
            }
        };

        if !has_required_properties(&properties, REQUIRED_PROPERTIES) {
            let missing = missing_properties(&properties, REQUIRED_PROPERTIES);
            warn!(
                missing = ?missing,
                "configuration is incomplete; submission not forwarded"
            );
            return SubmissionOutcome::AbortedProperties;
        }

        let url = properties.get(KEY_API_URL).unwrap_or_default();
        let credentials = ApiCredentials::new(
            properties.get(KEY_AUTH_TOKEN).unwrap_or_default(),
            properties.get(KEY_API_KEY).unwrap_or_default(),
        );
        let payload = payload_from_properties(&properties);

        match self.notifier.send(url, &credentials, &payload).await {
            Ok(receipt) if receipt.is_success() => {
                info!(
                    status = receipt.status,
                    form_id = event.form_id.as_deref(),
                    response_id = event.response_id.as_deref(),
                    "activity event forwarded"
                );
            }
            Ok(receipt) => {
                warn!(
                    status = receipt.status,
                    form_id = event.form_id.as_deref(),
                    "activity event endpoint returned a non-success status"
                );
            }
            Err(e) => {
                error!(
                    error = %e,
                    form_id = event.form_id.as_deref(),
                    "activity event request failed"
                );
            }
        }

        SubmissionOutcome::Dispatched
    }

    /// Recovery path taken when the host still requires authorization.
    ///
    /// The owner must complete the handshake out-of-band; the only effect
    /// here is diagnostics. A zero daily mail quota is logged separately so
    /// the two conditions can be told apart in the log.
    async fn on_authorization_required(&self) {
        warn!(
            "authorization is required and cannot be completed automatically; \
             the form owner must complete the authorization handshake"
        );

        if let Some(0) = self.auth.remaining_mail_quota().await {
            error!("mail service daily quota is zero; authorization notices cannot be sent");
        }
    }
}

/// Build the outbound payload from the stored activity/user fields.
///
/// Absent keys stay absent; stored values are forwarded verbatim.
fn payload_from_properties(properties: &Properties) -> ActivityEventPayload {
    let field = |key: &str| properties.get(key).map(str::to_owned);

    ActivityEventPayload {
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
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::framework::{AuthorizationStatus, DeliveryReceipt, NotifyError, StoreError};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedStore {
        properties: Properties,
    }

    #[async_trait]
    impl PropertyStore for FixedStore {
        async fn get_properties(&self) -> Result<Properties, StoreError> {
            Ok(self.properties.clone())
        }

        async fn set_properties(&self, _update: Properties) -> Result<(), StoreError> {
            Ok(())
        }
    }

    struct FixedAuth {
        status: AuthorizationStatus,
        quota: Option<u32>,
        quota_queries: AtomicUsize,
    }

    impl FixedAuth {
        fn new(status: AuthorizationStatus, quota: Option<u32>) -> Self {
            Self {
                status,
                quota,
                quota_queries: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl AuthorizationProvider for &FixedAuth {
        async fn authorization_status(&self, _mode: AuthMode) -> AuthorizationStatus {
            self.status
        }

        async fn remaining_mail_quota(&self) -> Option<u32> {
            self.quota_queries.fetch_add(1, Ordering::SeqCst);
            self.quota
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, ApiCredentials, ActivityEventPayload)>>,
    }

    #[async_trait]
    impl ActivityNotifier for &RecordingNotifier {
        async fn send(
            &self,
            url: &str,
            credentials: &ApiCredentials,
            payload: &ActivityEventPayload,
        ) -> Result<DeliveryReceipt, NotifyError> {
            self.sent
                .lock()
                .unwrap()
                .push((url.to_string(), credentials.clone(), payload.clone()));
            Ok(DeliveryReceipt { status: 200 })
        }
    }

    fn complete_properties() -> Properties {
        let mut properties = Properties::new();
        properties.insert(KEY_API_URL, "https://api.example.com/events");
        properties.insert(KEY_AUTH_TOKEN, "token-1");
        properties.insert(KEY_API_KEY, "key-1");
        properties.insert(KEY_ACTIVITY_ID, "badge-42");
        properties
    }

    #[tokio::test]
    async fn authorization_required_aborts_without_sending() {
        let auth = FixedAuth::new(AuthorizationStatus::Required, Some(50));
        let notifier = RecordingNotifier::default();
        let dispatcher = SubmissionDispatcher::new(
            FixedStore {
                properties: complete_properties(),
            },
            &auth,
            &notifier,
        );

        let outcome = dispatcher
            .handle_submission(&SubmissionEvent::default())
            .await;

        assert_eq!(outcome, SubmissionOutcome::AbortedAuthorization);
        assert!(!outcome.forwarded());
        // the recovery handler ran exactly once
        assert_eq!(auth.quota_queries.load(Ordering::SeqCst), 1);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_required_property_aborts_without_sending() {
        let mut properties = Properties::new();
        properties.insert(KEY_API_URL, "https://api.example.com/events");
        properties.insert(KEY_API_KEY, "key-1");
        // authToken intentionally absent

        let auth = FixedAuth::new(AuthorizationStatus::NotRequired, Some(50));
        let notifier = RecordingNotifier::default();
        let dispatcher = SubmissionDispatcher::new(FixedStore { properties }, &auth, &notifier);

        let outcome = dispatcher
            .handle_submission(&SubmissionEvent::default())
            .await;

        assert_eq!(outcome, SubmissionOutcome::AbortedProperties);
        assert!(notifier.sent.lock().unwrap().is_empty());
        assert_eq!(auth.quota_queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn complete_configuration_dispatches_exactly_once() {
        let auth = FixedAuth::new(AuthorizationStatus::NotRequired, Some(50));
        let notifier = RecordingNotifier::default();
        let dispatcher = SubmissionDispatcher::new(
            FixedStore {
                properties: complete_properties(),
            },
            &auth,
            &notifier,
        );

        let outcome = dispatcher
            .handle_submission(&SubmissionEvent::default())
            .await;

        assert_eq!(outcome, SubmissionOutcome::Dispatched);
        assert!(outcome.forwarded());

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (url, credentials, payload) = &sent[0];
        assert_eq!(url, "https://api.example.com/events");
        assert_eq!(credentials.auth_token, "token-1");
        assert_eq!(credentials.api_key, "key-1");
        assert_eq!(payload.activity_id.as_deref(), Some("badge-42"));
    }

    #[tokio::test]
    async fn other_host_status_counts_as_granted() {
        let auth = FixedAuth::new(AuthorizationStatus::Other, None);
        let notifier = RecordingNotifier::default();
        let dispatcher = SubmissionDispatcher::new(
            FixedStore {
                properties: complete_properties(),
            },
            &auth,
            &notifier,
        );

        let outcome = dispatcher
            .handle_submission(&SubmissionEvent::default())
            .await;

        assert_eq!(outcome, SubmissionOutcome::Dispatched);
    }

    #[test]
    fn payload_carries_stored_fields_and_omits_absent_ones() {
        let mut properties = complete_properties();
        properties.insert(KEY_EMAIL, "ada@example.com");

        let payload = payload_from_properties(&properties);

        assert_eq!(payload.activity_id.as_deref(), Some("badge-42"));
        assert_eq!(payload.email.as_deref(), Some("ada@example.com"));
        assert_eq!(payload.user_id, None);
        assert_eq!(payload.date1, None);
    }
}
