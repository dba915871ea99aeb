//! Storage provider capability
//!
//! The narrow surface both local stores implement, so the session layer
//! can be exercised without a real database or jar file behind it.

use chrono::Duration;

use crate::cookie::SameSite;
use crate::Result;

/// Write attributes with cookie semantics.
///
/// A store with no use for an attribute ignores it.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Cookie path scope
    pub path: String,
    /// Lifetime from write time
    pub max_age: Duration,
    /// Cross-site send policy
    pub same_site: SameSite,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            max_age: Duration::days(30),
            same_site: SameSite::Lax,
        }
    }
}

pub trait SessionStore: Send + Sync {
    /// Look up a value. `Ok(None)` means the store is healthy but holds no
    /// (unexpired) entry for the key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value under a key.
    fn set(&self, key: &str, value: &str, options: &StoreOptions) -> Result<()>;
}
