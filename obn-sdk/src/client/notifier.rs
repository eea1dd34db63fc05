//! Typed client for the notifier API (form host / frontend → obn server).
//!
//! Every request carries the end-user scope in the `Obn-User` header.

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::auth::USER_HEADER;
use crate::objects::settings::{SettingsUpdate, SettingsView};
use crate::objects::submit::{AuthorizationView, SubmissionEvent, SubmitAck};

/// Typed HTTP client for the notifier API.
#[derive(Debug, Clone)]
pub struct NotifierApiClient {
    http: Client,
    base_url: Url,
    user: String,
}

impl NotifierApiClient {
    /// Create a new `NotifierApiClient`.
    ///
    /// * `base_url` – root URL of the obn server (e.g. `https://notify.example.com`).
    /// * `user` – the end-user scope for all requests made by this client.
    pub fn new(base_url: Url, user: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            user: user.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/v1/settings` – fetch the seeded settings form and the
    /// missing-required state for the current user.
    pub async fn get_settings(&self) -> Result<SettingsView, ClientError> {
        let url = self.base_url.join("/api/v1/settings")?;

        let resp = self
            .http
            .get(url)
            .header(USER_HEADER, &self.user)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `PUT /api/v1/settings` – merge the given values into the stored
    /// configuration for the current user.
    pub async fn save_settings(&self, update: &SettingsUpdate) -> Result<(), ClientError> {
        let url = self.base_url.join("/api/v1/settings")?;

        let resp = self
            .http
            .put(url)
            .header(USER_HEADER, &self.user)
            .json(update)
            .send()
            .await?;

        expect_success(resp).await
    }

    /// `POST /api/v1/submissions` – report a form submission and learn
    /// whether the activity event was forwarded.
    pub async fn submit(&self, event: &SubmissionEvent) -> Result<SubmitAck, ClientError> {
        let url = self.base_url.join("/api/v1/submissions")?;

        let resp = self
            .http
            .post(url)
            .header(USER_HEADER, &self.user)
            .json(event)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /api/v1/authorization` – current authorization status.
    pub async fn authorization_status(&self) -> Result<AuthorizationView, ClientError> {
        let url = self.base_url.join("/api/v1/authorization")?;

        let resp = self
            .http
            .get(url)
            .header(USER_HEADER, &self.user)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `POST /api/v1/authorization` – record the one-time grant for the
    /// current user. Idempotent.
    pub async fn authorize(&self) -> Result<AuthorizationView, ClientError> {
        let url = self.base_url.join("/api/v1/authorization")?;

        let resp = self
            .http
            .post(url)
            .header(USER_HEADER, &self.user)
            .send()
            .await?;

        parse_response(resp).await
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    Ok(())
}
