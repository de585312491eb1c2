//! Configuration module for Staffdesk.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Default number of employees shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the key-value store
    pub db_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// Records per page when the caller does not ask for a size
    pub page_size: usize,
    /// Username accepted by the login gate
    pub admin_username: String,
    /// Password accepted by the login gate
    pub admin_password: String,
    /// Seed the default divisions when the collection has never been written
    pub seed_defaults: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("STAFFDESK_DB_PATH")
            .unwrap_or_else(|_| "./data/staffdesk.sqlite".to_string())
            .into();

        let log_level = env::var("STAFFDESK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("STAFFDESK_LOG_FORMAT")
            .map(|v| v.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let page_size = env::var("STAFFDESK_PAGE_SIZE")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let admin_username =
            env::var("STAFFDESK_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password =
            env::var("STAFFDESK_ADMIN_PASSWORD").unwrap_or_else(|_| "pastibisa".to_string());

        let seed_defaults = env::var("STAFFDESK_SEED_DEFAULTS")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Self {
            db_path,
            log_level,
            log_json,
            page_size,
            admin_username,
            admin_password,
            seed_defaults,
        }
    }

    /// Configuration rooted at an explicit store path, with every other value defaulted.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            log_level: "info".to_string(),
            log_json: false,
            page_size: DEFAULT_PAGE_SIZE,
            admin_username: "admin".to_string(),
            admin_password: "pastibisa".to_string(),
            seed_defaults: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        env::remove_var("STAFFDESK_DB_PATH");
        env::remove_var("STAFFDESK_LOG_LEVEL");
        env::remove_var("STAFFDESK_LOG_FORMAT");
        env::remove_var("STAFFDESK_PAGE_SIZE");
        env::remove_var("STAFFDESK_ADMIN_USERNAME");
        env::remove_var("STAFFDESK_ADMIN_PASSWORD");
        env::remove_var("STAFFDESK_SEED_DEFAULTS");

        let config = Config::from_env();

        assert_eq!(config.db_path, PathBuf::from("./data/staffdesk.sqlite"));
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "pastibisa");
        assert!(config.seed_defaults);

        env::set_var("STAFFDESK_LOG_FORMAT", "JSON");
        assert!(Config::from_env().log_json);
        env::remove_var("STAFFDESK_LOG_FORMAT");
    }

    #[test]
    fn test_with_db_path_uses_defaults() {
        let config = Config::with_db_path("/tmp/staffdesk-test.sqlite");

        assert_eq!(config.db_path, PathBuf::from("/tmp/staffdesk-test.sqlite"));
        assert_eq!(config.page_size, 6);
        assert!(config.seed_defaults);
    }
}
