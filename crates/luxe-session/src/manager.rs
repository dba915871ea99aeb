//! Session Manager
//!
//! Writes the identifier to both local stores and reads it back through an
//! explicit fallback chain: key-value store first, cookie jar second.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use luxe_storage::{SameSite, SessionStore, StoreOptions};

use crate::Result;

/// Fixed key (and cookie name) the identifier is stored under.
pub const SESSION_KEY: &str = "luxe_sessionId";

/// Cookie lifetime, counted from each write.
const SESSION_TTL_DAYS: i64 = 30;

/// Which local store satisfied a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadSource {
    KeyValue,
    Cookie,
}

impl ReadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadSource::KeyValue => "keyvalue",
            ReadSource::Cookie => "cookie",
        }
    }
}

/// A session identifier together with the store that answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub id: String,
    pub source: ReadSource,
}

pub struct SessionManager {
    /// Primary durable store
    kv: Arc<dyn SessionStore>,
    /// Redundant cookie copy
    cookies: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(kv: Arc<dyn SessionStore>, cookies: Arc<dyn SessionStore>) -> Self {
        Self { kv, cookies }
    }

    fn cookie_options() -> StoreOptions {
        StoreOptions {
            path: "/".to_string(),
            max_age: Duration::days(SESSION_TTL_DAYS),
            same_site: SameSite::Lax,
        }
    }

    /// Persist the identifier to both stores.
    ///
    /// A key-value write failure is logged and swallowed; the cookie copy
    /// still goes through. Only a cookie write failure is surfaced.
    pub fn save(&self, id: &str) -> Result<()> {
        let options = Self::cookie_options();

        if let Err(e) = self.kv.set(SESSION_KEY, id, &options) {
            tracing::warn!(error = %e, "Key-value store rejected session write");
        }

        self.cookies.set(SESSION_KEY, id, &options)?;

        tracing::debug!(session_id = %id, "Saved session locally");

        Ok(())
    }

    /// Read the identifier back: key-value store first, cookie jar second.
    ///
    /// A key-value failure is logged and the cookie fallback consulted
    /// instead.
    pub fn read(&self) -> Result<Option<StoredSession>> {
        match self.kv.get(SESSION_KEY) {
            Ok(Some(id)) => {
                return Ok(Some(StoredSession {
                    id,
                    source: ReadSource::KeyValue,
                }))
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Key-value store unreadable, trying cookie jar");
            }
        }

        Ok(self.cookies.get(SESSION_KEY)?.map(|id| StoredSession {
            id,
            source: ReadSource::Cookie,
        }))
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            kv: Arc::clone(&self.kv),
            cookies: Arc::clone(&self.cookies),
        }
    }
}
