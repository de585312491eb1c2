//! Session holder: the signed-in user and their profile.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::auth::{Credentials, INVALID_CREDENTIALS};
use crate::errors::AppError;
use crate::models::{LoginOutcome, ProfileUpdate, UserProfile};
use crate::store::{keys, Store};

use super::required;

/// Anonymous until a successful [`login`](Self::login), authenticated until
/// [`logout`](Self::logout).
///
/// The profile lives under the `user` key and outlives sign-out. The `session` key names the
/// signed-in user while a session is open, so a later process can [`restore`](Self::restore) it.
#[derive(Clone)]
pub struct SessionHolder {
    store: Store,
    credentials: Credentials,
    current: Arc<RwLock<Option<UserProfile>>>,
}

impl SessionHolder {
    pub fn new(store: Store, credentials: Credentials) -> Self {
        Self {
            store,
            credentials,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Rehydrate the session from the store.
    pub async fn restore(&self) -> Result<Option<UserProfile>, AppError> {
        let signed_in: Option<String> = self.store.read(keys::SESSION).await?;
        let stored = match signed_in {
            Some(username) if username == self.credentials.username() => {
                let profile: Option<UserProfile> = self.store.read(keys::USER).await?;
                profile.filter(|user| user.username == username)
            }
            _ => None,
        };

        *self.current.write().await = stored.clone();
        if let Some(user) = &stored {
            tracing::debug!(username = %user.username, "Restored session");
        }
        Ok(stored)
    }

    /// Check the submitted credentials and sign in on success.
    ///
    /// A mismatch in either field yields the same generic message and leaves the session as it
    /// was.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AppError> {
        if !self.credentials.verify(username, password) {
            tracing::warn!("Rejected login attempt");
            return Ok(LoginOutcome {
                success: false,
                message: INVALID_CREDENTIALS.to_string(),
            });
        }

        let stored: Option<UserProfile> = self.store.read(keys::USER).await?;
        let mut user = stored
            .filter(|user| user.username == username)
            .unwrap_or_else(|| UserProfile::initial(username));
        user.last_login_at = Some(Utc::now().to_rfc3339());

        self.store.write(keys::USER, &user).await?;
        self.store.write(keys::SESSION, username).await?;
        *self.current.write().await = Some(user);

        tracing::info!(username, "Signed in");
        Ok(LoginOutcome {
            success: true,
            message: "Login successful!".to_string(),
        })
    }

    /// Sign out. The profile is kept for the next login.
    pub async fn logout(&self) -> Result<(), AppError> {
        let mut guard = self.current.write().await;
        self.store.remove(keys::SESSION).await?;
        let previous = guard.take();

        if let Some(user) = previous {
            tracing::info!(username = %user.username, "Signed out");
        }
        Ok(())
    }

    pub async fn current_user(&self) -> Option<UserProfile> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// The signed-in user, or `Unauthorized`.
    pub async fn require_user(&self) -> Result<UserProfile, AppError> {
        self.current_user()
            .await
            .ok_or_else(|| AppError::Unauthorized("Please sign in first".to_string()))
    }

    /// Merge `update` into the signed-in user's profile. Name and email stay required.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, AppError> {
        let mut guard = self.current.write().await;
        let current = guard
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("Please sign in first".to_string()))?;

        let mut user = current.clone();
        if let Some(name) = &update.name {
            user.name = required("Name", name)?;
        }
        if let Some(email) = &update.email {
            user.email = required("Email", email)?;
        }
        if let Some(phone) = &update.phone {
            user.phone = phone.trim().to_string();
        }

        self.store.write(keys::USER, &user).await?;
        *guard = Some(user.clone());

        tracing::info!(username = %user.username, "Updated profile");
        Ok(user)
    }
}
