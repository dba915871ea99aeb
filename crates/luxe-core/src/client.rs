//! Composite session client
//!
//! Owns the two local stores, the identifier generator, and the webhook
//! notifier, and wires them into the ensure-on-startup and
//! rotate-on-login flows.

use std::sync::Arc;

use serde_json::Value;

use luxe_notify::WebhookNotifier;
use luxe_session::{make_session_id, ReadSource, SessionManager, StoredSession};
use luxe_storage::{CookieJar, KvStore};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Outcome of [`SessionClient::ensure_session`].
#[derive(Debug, Clone)]
pub struct EnsuredSession {
    pub id: String,
    /// Set when the identifier came out of a local store
    pub restored_from: Option<ReadSource>,
    /// Set when a fresh session was announced to the backend
    pub ack: Option<Value>,
}

/// Outcome of [`SessionClient::attach`]: the rotated identifier pair and
/// the webhook's acknowledgment.
#[derive(Debug, Clone)]
pub struct AttachedSession {
    pub old_id: String,
    pub new_id: String,
    pub ack: Value,
}

pub struct SessionClient {
    config: Config,
    manager: SessionManager,
    notifier: WebhookNotifier,
}

impl SessionClient {
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let kv = KvStore::open(&config.database_path)?;
        let cookies = CookieJar::open(config.cookie_jar_path.clone());
        let manager = SessionManager::new(Arc::new(kv), Arc::new(cookies));

        let notifier = WebhookNotifier::with_endpoints(
            &config.create_session_url,
            &config.attach_session_url,
        )?;

        Ok(Self {
            config,
            manager,
            notifier,
        })
    }

    /// Restore the locally stored session, or create, persist, and
    /// announce a fresh one.
    ///
    /// A restored session causes no network traffic. A failed webhook
    /// never fails the call; the ack carries the failure signal.
    pub async fn ensure_session(
        &self,
        user_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<EnsuredSession> {
        if let Some(StoredSession { id, source }) = self.manager.read()? {
            tracing::info!(
                session_id = %id,
                source = %source.as_str(),
                "Restored local session"
            );
            return Ok(EnsuredSession {
                id,
                restored_from: Some(source),
                ack: None,
            });
        }

        let id = make_session_id();
        self.manager.save(&id)?;

        let ack = self.notifier.post_create_session(&id, user_id, email).await;

        tracing::info!(session_id = %id, "Created new session");

        Ok(EnsuredSession {
            id,
            restored_from: None,
            ack: Some(ack),
        })
    }

    /// Rotate the identifier when the user signs in: announce the old/new
    /// pair to the attach webhook, then persist the replacement locally.
    ///
    /// A failed webhook never fails the rotation.
    pub async fn attach(&self, email: &str) -> Result<AttachedSession> {
        let old = self.manager.read()?.ok_or(CoreError::NoLocalSession)?;

        let new_id = make_session_id();
        let ack = self.notifier.attach_session(&old.id, &new_id, email).await;

        self.manager.save(&new_id)?;

        tracing::info!(
            old_session_id = %old.id,
            new_session_id = %new_id,
            "Attached session to user"
        );

        Ok(AttachedSession {
            old_id: old.id,
            new_id,
            ack,
        })
    }

    /// The locally stored session, if any.
    pub fn current_session(&self) -> Result<Option<StoredSession>> {
        Ok(self.manager.read()?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

// Implement std::io::Error conversion for fs operations
impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
