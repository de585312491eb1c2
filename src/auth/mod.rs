//! Login gate credential check.
//!
//! Implements constant-time comparison to mitigate timing attacks. This is a UI gate for a
//! single-user tool, not a security boundary.

use subtle::ConstantTimeEq;

/// Message returned for every failed login, whichever field was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password!";

/// The single credential pair the login gate accepts.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a submitted pair. Both fields are always compared.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = constant_time_compare(username, &self.username);
        let password_ok = constant_time_compare(password, &self.password);
        username_ok & password_ok
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    a_bytes.ct_eq(b_bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("pastibisa", "pastibisa"));
    }

    #[test]
    fn test_constant_time_compare_not_equal() {
        assert!(!constant_time_compare("pastibisa", "pastibisi"));
    }

    #[test]
    fn test_constant_time_compare_different_lengths() {
        assert!(!constant_time_compare("short", "much-longer-key"));
    }

    #[test]
    fn test_verify_requires_both_fields() {
        let creds = Credentials::new("admin", "pastibisa");
        assert!(creds.verify("admin", "pastibisa"));
        assert!(!creds.verify("admin", "wrong"));
        assert!(!creds.verify("root", "pastibisa"));
        assert!(!creds.verify("", ""));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("admin", "pastibisa");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("pastibisa"));
    }
}
