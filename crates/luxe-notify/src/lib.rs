//! Luxe Remote Notifier
//!
//! Announces session creation and reattachment to the backend webhooks.
//! Calls are fire-and-forget: a single attempt each, every failure folded
//! into the acknowledgment value instead of an error.

mod error;
mod notifier;
mod payload;

pub use error::NotifyError;
pub use notifier::{WebhookNotifier, ATTACH_SESSION_WEBHOOK, CREATE_SESSION_WEBHOOK};
pub use payload::{AttachSessionPayload, CreateSessionPayload};

pub type Result<T> = std::result::Result<T, NotifyError>;
