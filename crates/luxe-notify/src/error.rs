//! Notifier error types
//!
//! Only construction can fail; transport failures at call time fold into
//! the acknowledgment value.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}
