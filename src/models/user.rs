//! Signed-in user profile.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, persisted under the `user` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Fixed once the profile exists
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl UserProfile {
    /// Profile created the first time `username` signs in.
    pub fn initial(username: &str) -> Self {
        Self {
            name: "Administrator".to_string(),
            email: format!("{}@staffdesk.local", username),
            phone: String::new(),
            username: username.to_string(),
            last_login_at: None,
        }
    }
}

/// Editable profile fields. There is no username field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Result of a login attempt.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginOutcome {
    pub success: bool,
    pub message: String,
}
