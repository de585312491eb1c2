//! JSON blob access by key.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use std::path::Path;

use crate::errors::AppError;

/// Well-known keys of the persisted state layout.
pub mod keys {
    pub const EMPLOYEES: &str = "employees";
    pub const DIVISIONS: &str = "divisions";
    pub const USER: &str = "user";
    pub const SESSION: &str = "session";
    pub const THEME: &str = "theme";
}

/// Key-value store of JSON-serializable blobs.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the store file at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self, AppError> {
        let pool = super::init_database(db_path).await?;
        Ok(Self::new(pool))
    }

    /// Read the blob under `key`, or `None` if it was never written.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let raw: String = row.get("value");
                let value = serde_json::from_str(&raw).map_err(|e| {
                    tracing::error!(key, "Stored value is not valid JSON: {}", e);
                    AppError::Storage(format!("Stored value for '{}' is corrupt: {}", key, e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Read the blob under `key`, falling back to `default` when absent.
    pub async fn read_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, AppError> {
        Ok(self.read(key).await?.unwrap_or(default))
    }

    /// Read the blob under `key`, falling back to `T::default()` when absent.
    pub async fn read_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &str,
    ) -> Result<T, AppError> {
        Ok(self.read(key).await?.unwrap_or_default())
    }

    /// Replace the blob under `key`.
    pub async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(&raw)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::debug!(key, bytes = raw.len(), "Wrote blob");
        Ok(())
    }

    /// Remove the blob under `key`. Removing an absent key is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All keys currently stored, sorted.
    pub async fn keys(&self) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query("SELECT key FROM kv ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("key")).collect())
    }
}
