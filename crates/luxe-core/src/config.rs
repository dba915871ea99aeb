//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use luxe_notify::{ATTACH_SESSION_WEBHOOK, CREATE_SESSION_WEBHOOK};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the key-value database file
    pub database_path: PathBuf,
    /// Path to the cookie jar file
    pub cookie_jar_path: PathBuf,
    /// Create-session webhook endpoint
    pub create_session_url: String,
    /// Attach-session webhook endpoint
    pub attach_session_url: String,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("luxe.db"),
            cookie_jar_path: data_dir.join("cookies.txt"),
            create_session_url: CREATE_SESSION_WEBHOOK.to_string(),
            attach_session_url: ATTACH_SESSION_WEBHOOK.to_string(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Luxe"))
            .unwrap_or_else(|| PathBuf::from(".luxe"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for the local data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
