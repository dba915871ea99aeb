//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] luxe_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] luxe_session::SessionError),

    #[error("Notifier error: {0}")]
    Notify(#[from] luxe_notify::NotifyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No local session to attach")]
    NoLocalSession,
}
