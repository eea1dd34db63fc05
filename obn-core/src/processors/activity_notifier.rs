//! Reqwest-backed implementation of the outbound notification call.

use crate::framework::{ActivityNotifier, DeliveryReceipt, NotifyError};
use async_trait::async_trait;
use obn_sdk::auth::{API_KEY_HEADER, ApiCredentials};
use obn_sdk::objects::ActivityEventPayload;
use std::time::Duration;
use url::Url;

/// Default timeout for the outbound request. There is no override per call;
/// a submission waits at most this long for the endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends activity events over HTTP.
///
/// One request per submission, no retries. Authentication is a bearer token
/// in the `Authorization` header plus the API key in `X-Api-Key`.
#[derive(Debug, Clone)]
pub struct HttpActivityNotifier {
    http: reqwest::Client,
}

impl HttpActivityNotifier {
    /// Create a notifier with the default request timeout.
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Create a notifier with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }
}

impl Default for HttpActivityNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActivityNotifier for HttpActivityNotifier {
    async fn send(
        &self,
        url: &str,
        credentials: &ApiCredentials,
        payload: &ActivityEventPayload,
    ) -> Result<DeliveryReceipt, NotifyError> {
        let url = Url::parse(url)?;

        let response = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, credentials.bearer())
            .header(API_KEY_HEADER, &credentials.api_key)
            .json(payload)
            .send()
            .await?;

        Ok(DeliveryReceipt {
            status: response.status().as_u16(),
        })
    }
}
