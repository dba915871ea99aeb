//! Luxe Session Identity
//!
//! - The session identifier is generated client-side: timestamp plus a
//!   short random suffix, base64-encoded
//! - It is persisted redundantly to a key-value store and a cookie jar
//! - Reads walk an explicit fallback chain and report which store answered

mod error;
mod manager;
mod token;

pub use error::SessionError;
pub use manager::{ReadSource, SessionManager, StoredSession, SESSION_KEY};
pub use token::make_session_id;

pub type Result<T> = std::result::Result<T, SessionError>;
