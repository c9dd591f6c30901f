//! In-memory credential store for tests and ephemeral sessions.

use async_trait::async_trait;
use parking_lot::Mutex;
use rishta_domain::{CredentialBundle, Result};
use rishta_core::CredentialStore;

#[derive(Default)]
pub struct MemoryCredentialStore {
    bundle: Mutex<Option<CredentialBundle>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<CredentialBundle>> {
        Ok(self.bundle.lock().clone())
    }

    async fn save(&self, bundle: &CredentialBundle) -> Result<()> {
        *self.bundle.lock() = Some(bundle.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.bundle.lock() = None;
        Ok(())
    }
}
