//! Luxe Local Persistence
//!
//! The session record is kept in two redundant stores: a SQLite key-value
//! store (primary) and a cookie jar with browser cookie semantics
//! (fallback). Both sit behind the [`SessionStore`] capability so the
//! session layer can run against test doubles.

mod cookie;
mod error;
mod kv;
mod migrations;
mod store;

pub use cookie::{Cookie, CookieJar, SameSite};
pub use error::StorageError;
pub use kv::KvStore;
pub use store::{SessionStore, StoreOptions};

pub type Result<T> = std::result::Result<T, StorageError>;
