//! User model for storage.

use serde::{Deserialize, Serialize};

/// User document stored in Firestore.
///
/// Exactly one of `password_hash` (local account) or `google_id` (OAuth
/// account) is set at creation, and neither changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier (also used as document ID); never changes
    pub id: String,
    /// Login name; present for locally registered accounts only
    pub username: Option<String>,
    /// Argon2id hash in PHC string format; local accounts only
    pub password_hash: Option<String>,
    /// Google's stable `sub` identifier; OAuth accounts only
    pub google_id: Option<String>,
    /// The user's submitted secret, if any; overwritten on resubmit
    pub secret: Option<String>,
    /// When the account was created (RFC 3339)
    pub created_at: String,
}

impl User {
    /// Create a locally registered user.
    pub fn new_local(username: &str, password_hash: String) -> Self {
        Self {
            id: new_user_id(),
            username: Some(username.to_string()),
            password_hash: Some(password_hash),
            google_id: None,
            secret: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a user from a first-time Google login.
    pub fn new_google(google_id: &str) -> Self {
        Self {
            id: new_user_id(),
            username: None,
            password_hash: None,
            google_id: Some(google_id.to_string()),
            secret: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Generate a random 128-bit document ID.
fn new_user_id() -> String {
    use rand::RngCore;

    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
