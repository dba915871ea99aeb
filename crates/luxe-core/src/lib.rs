//! Luxe Session Client
//!
//! Client-side session identity for the Luxe front end: a locally
//! generated identifier kept in two redundant stores, announced to the
//! backend webhooks on creation and on reattachment to a signed-in user.

mod client;
mod config;
mod error;

pub use client::{AttachedSession, EnsuredSession, SessionClient};
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use luxe_notify::{
    AttachSessionPayload, CreateSessionPayload, NotifyError, WebhookNotifier,
    ATTACH_SESSION_WEBHOOK, CREATE_SESSION_WEBHOOK,
};
pub use luxe_session::{
    make_session_id, ReadSource, SessionError, SessionManager, StoredSession, SESSION_KEY,
};
pub use luxe_storage::{
    Cookie, CookieJar, KvStore, SameSite, SessionStore, StorageError, StoreOptions,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
