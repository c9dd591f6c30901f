//! Session manager
//!
//! Owns the in-memory view of the credential bundle and keeps it in step
//! with the store:
//! - Bundle loaded from the store on startup
//! - Persist-then-cache ordering on establish, so nothing observes the
//!   new session before it is durable
//! - Unconditional clear for logout/deactivation teardown

use std::sync::Arc;

use async_trait::async_trait;
use rishta_domain::{CredentialBundle, Result, User};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::ports::{AccessTokenProvider, CredentialStore};

/// Thread-safe holder of the current session credentials.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<CredentialBundle>>,
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store, current: RwLock::new(None) }
    }

    /// Load persisted credentials into memory.
    ///
    /// Called once at process start. Returns `true` when a stored session
    /// was found.
    ///
    /// # Errors
    /// Returns error if the store itself fails (not if it is empty).
    pub async fn initialize(&self) -> Result<bool> {
        match self.store.load().await? {
            Some(bundle) => {
                *self.current.write().await = Some(bundle);
                info!("session manager initialized with stored credentials");
                Ok(true)
            }
            None => {
                debug!("no stored credentials found");
                Ok(false)
            }
        }
    }

    /// Persist a new bundle and only then make it visible in memory.
    ///
    /// The await completes after the store write, so a caller that
    /// navigates afterwards can never race a half-established session.
    ///
    /// # Errors
    /// Returns error if the store write fails; the in-memory view is left
    /// untouched in that case.
    pub async fn establish(&self, bundle: CredentialBundle) -> Result<()> {
        self.store.save(&bundle).await?;
        *self.current.write().await = Some(bundle);
        info!("session established");
        Ok(())
    }

    /// Drop the session everywhere. Idempotent.
    ///
    /// # Errors
    /// Returns error if the store clear fails; the in-memory view is
    /// cleared regardless so the UI's "am I logged in" answer is already
    /// final.
    pub async fn clear(&self) -> Result<()> {
        *self.current.write().await = None;
        let result = self.store.clear().await;
        info!("session cleared");
        result
    }

    /// `true` when a credential bundle is held.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Current refresh token, if any.
    pub async fn refresh_token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|b| b.refresh_token.clone())
    }

    /// Current user data, if any.
    pub async fn user(&self) -> Option<User> {
        self.current.read().await.as_ref().map(|b| b.user.clone())
    }

    /// Snapshot of the whole bundle.
    pub async fn bundle(&self) -> Option<CredentialBundle> {
        self.current.read().await.clone()
    }
}

#[async_trait]
impl AccessTokenProvider for SessionManager {
    async fn access_token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|b| b.access_token.clone())
    }
}
