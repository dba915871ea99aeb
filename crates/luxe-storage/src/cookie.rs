//! Cookie jar
//!
//! Redundant second copy of the session record, kept with browser cookie
//! semantics: path scope, UTC expiry, SameSite policy. Optionally backed
//! by a file holding one `Set-Cookie`-style line per cookie.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::store::{SessionStore, StoreOptions};
use crate::Result;

/// Cookie date shape, as `Date.prototype.toUTCString` produces it.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl std::str::FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            _ => Err(format!("Unknown SameSite policy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    /// Absent means a session cookie that never expires on its own
    pub expires: Option<DateTime<Utc>>,
    pub same_site: SameSite,
}

impl Cookie {
    pub fn new(name: String, value: String) -> Self {
        Self {
            name,
            value,
            path: "/".to_string(),
            expires: None,
            same_site: SameSite::Lax,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires, Some(at) if at <= now)
    }

    /// Serialize as a `Set-Cookie`-style line.
    pub fn to_line(&self) -> String {
        let mut line = format!("{}={}; Path={}", self.name, self.value, self.path);
        if let Some(at) = self.expires {
            line.push_str(&format!("; Expires={}", at.format(EXPIRES_FORMAT)));
        }
        line.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        line
    }

    /// Parse a `Set-Cookie`-style line. Lines without a leading
    /// `name=value` pair are rejected; unknown attributes are skipped.
    pub fn parse(line: &str) -> Option<Self> {
        let mut segments = line.split(';').map(str::trim);

        let (name, value) = segments.next()?.split_once('=')?;
        if name.is_empty() {
            return None;
        }

        let mut cookie = Cookie::new(name.to_string(), value.to_string());
        for segment in segments {
            let (attr, attr_value) = match segment.split_once('=') {
                Some((a, v)) => (a, v),
                None => (segment, ""),
            };
            match attr.to_ascii_lowercase().as_str() {
                "path" => cookie.path = attr_value.to_string(),
                "expires" => {
                    cookie.expires = DateTime::parse_from_rfc2822(attr_value)
                        .map(|dt| dt.with_timezone(&Utc))
                        .ok();
                }
                "samesite" => {
                    if let Ok(policy) = attr_value.parse() {
                        cookie.same_site = policy;
                    }
                }
                _ => {}
            }
        }

        Some(cookie)
    }
}

pub struct CookieJar {
    /// Backing file; `None` keeps the jar purely in memory
    file_path: Option<PathBuf>,
    cookies: Arc<RwLock<HashMap<String, Cookie>>>,
}

impl CookieJar {
    pub fn in_memory() -> Self {
        Self {
            file_path: None,
            cookies: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Open a file-backed jar. A missing or unreadable file degrades to an
    /// empty jar; unparseable lines are skipped.
    pub fn open(path: PathBuf) -> Self {
        let cookies = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let mut map = HashMap::new();
                for line in contents.lines() {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match Cookie::parse(line) {
                        Some(cookie) => {
                            map.insert(cookie.name.clone(), cookie);
                        }
                        None => {
                            tracing::warn!(line = %line, "Skipping unparseable cookie line")
                        }
                    }
                }
                map
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not read cookie jar, starting empty"
                );
                HashMap::new()
            }
        };

        Self {
            file_path: Some(path),
            cookies: Arc::new(RwLock::new(cookies)),
        }
    }

    pub fn set_cookie(&self, cookie: Cookie) -> Result<()> {
        self.cookies.write().insert(cookie.name.clone(), cookie);
        self.persist()
    }

    /// Value of an unexpired cookie, if any.
    pub fn get_value(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.read();
        let cookie = cookies.get(name)?;
        if cookie.is_expired(Utc::now()) {
            return None;
        }
        Some(cookie.value.clone())
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };

        let mut lines: Vec<String> = self.cookies.read().values().map(Cookie::to_line).collect();
        lines.sort();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, lines.join("\n"))?;

        Ok(())
    }
}

impl SessionStore for CookieJar {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get_value(key))
    }

    fn set(&self, key: &str, value: &str, options: &StoreOptions) -> Result<()> {
        self.set_cookie(Cookie {
            name: key.to_string(),
            value: value.to_string(),
            path: options.path.clone(),
            expires: Some(Utc::now() + options.max_age),
            same_site: options.same_site,
        })
    }
}

impl Clone for CookieJar {
    fn clone(&self) -> Self {
        Self {
            file_path: self.file_path.clone(),
            cookies: Arc::clone(&self.cookies),
        }
    }
}
