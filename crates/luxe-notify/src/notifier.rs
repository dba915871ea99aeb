//! Webhook notifier
//!
//! One shared HTTP client, one POST per event. The acknowledgment is the
//! backend's parsed JSON body; a non-JSON body becomes `{"ok": <status>}`,
//! a transport failure becomes `{"ok": false, "error": ...}` after being
//! logged. At-most-once delivery: no retry, no timeout, no backoff.

use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use url::Url;

use crate::payload::{AttachSessionPayload, CreateSessionPayload};
use crate::Result;

/// Production create-session endpoint.
pub const CREATE_SESSION_WEBHOOK: &str = "https://n8nluxe.luxeveda.com/webhook/create_session";
/// Production attach-session endpoint.
pub const ATTACH_SESSION_WEBHOOK: &str = "https://n8nluxe.luxeveda.com/webhook/attach_session";

pub struct WebhookNotifier {
    client: Client,
    create_url: Url,
    attach_url: Url,
}

impl WebhookNotifier {
    /// Notifier against the fixed production endpoints.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(CREATE_SESSION_WEBHOOK, ATTACH_SESSION_WEBHOOK)
    }

    pub fn with_endpoints(create_url: &str, attach_url: &str) -> Result<Self> {
        let client = Client::builder().user_agent("luxe-session").build()?;

        Ok(Self {
            client,
            create_url: Url::parse(create_url)?,
            attach_url: Url::parse(attach_url)?,
        })
    }

    /// Announce a newly created session.
    ///
    /// Never fails: the returned value is the acknowledgment, best-effort.
    pub async fn post_create_session(
        &self,
        session_id: &str,
        user_id: Option<&str>,
        email: Option<&str>,
    ) -> Value {
        let payload = CreateSessionPayload {
            session_id: session_id.to_string(),
            user_id: user_id.map(str::to_string),
            email: email.map(str::to_string),
        };

        self.post(self.create_url.clone(), &payload, "create_session")
            .await
    }

    /// Reattach an anonymous session to an authenticated identity.
    ///
    /// Same contract as [`Self::post_create_session`].
    pub async fn attach_session(
        &self,
        old_session_id: &str,
        new_session_id: &str,
        email: &str,
    ) -> Value {
        let payload = AttachSessionPayload {
            old_session_id: old_session_id.to_string(),
            new_session_id: new_session_id.to_string(),
            email: email.to_string(),
        };

        self.post(self.attach_url.clone(), &payload, "attach_session")
            .await
    }

    async fn post<P: Serialize>(&self, url: Url, payload: &P, webhook: &str) -> Value {
        let response = match self.client.post(url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(webhook = %webhook, error = %e, "Webhook request failed");
                return json!({ "ok": false, "error": e.to_string() });
            }
        };

        let ok = response.status().is_success();
        match response.json::<Value>().await {
            Ok(body) => body,
            Err(_) => json!({ "ok": ok }),
        }
    }
}
