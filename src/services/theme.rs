//! Persisted theme preference.

use crate::errors::AppError;
use crate::models::ThemePreference;
use crate::store::{keys, Store};

#[derive(Clone)]
pub struct ThemeService {
    store: Store,
}

impl ThemeService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// The stored preference. Missing or unrecognised values read as light.
    pub async fn current(&self) -> Result<ThemePreference, AppError> {
        let stored: Option<String> = self.store.read(keys::THEME).await?;
        Ok(match stored {
            None => ThemePreference::default(),
            Some(raw) => ThemePreference::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Unknown theme preference, using light");
                ThemePreference::default()
            }),
        })
    }

    pub async fn set(&self, preference: ThemePreference) -> Result<(), AppError> {
        self.store.write(keys::THEME, preference.as_str()).await?;
        tracing::info!(theme = %preference, "Theme changed");
        Ok(())
    }

    /// Whether the dark palette applies right now.
    pub async fn is_dark(&self, system_prefers_dark: bool) -> Result<bool, AppError> {
        Ok(self.current().await?.is_dark(system_prefers_dark))
    }
}
