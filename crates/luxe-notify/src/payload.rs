//! Webhook payload shapes
//!
//! Field names follow the backend's camelCase contract; absent optionals
//! serialize as explicit nulls.

use serde::{Deserialize, Serialize};

/// Body for the create-session webhook, sent once per new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionPayload {
    pub session_id: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

/// Body for the attach-session webhook, sent when an anonymous session is
/// linked to an authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachSessionPayload {
    pub old_session_id: String,
    pub new_session_id: String,
    pub email: String,
}
