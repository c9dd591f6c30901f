//! Permission broker.
//!
//! Every call site gets the same contract: ask once, get a boolean.
//! Internally the broker decides between short-circuiting (already
//! granted, or platform not runtime-gated), requesting straight from the
//! OS (rationale already shown for this key), or parking the request in
//! the prompt slot until a UI handler resolves it.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use rishta_domain::PermissionRequest;
use tracing::{debug, warn};

use super::ports::PermissionsApi;
use super::slot::{PromptReply, PromptSlot};

/// Broker over the OS permission API and the rationale prompt.
///
/// The explain-once memory lives on the instance (process lifetime, not
/// persisted): construct one broker and share it.
pub struct PermissionBroker {
    os: Arc<dyn PermissionsApi>,
    slot: Arc<PromptSlot>,
    explained_keys: Mutex<HashSet<String>>,
}

impl PermissionBroker {
    #[must_use]
    pub fn new(os: Arc<dyn PermissionsApi>) -> Self {
        Self { os, slot: Arc::new(PromptSlot::new()), explained_keys: Mutex::new(HashSet::new()) }
    }

    /// The slot the UI layer renders prompts from and resolves into.
    #[must_use]
    pub fn prompt_slot(&self) -> Arc<PromptSlot> {
        self.slot.clone()
    }

    /// UI handler entry point: the user accepted the rationale.
    pub fn confirm_prompt(&self) {
        self.slot.resolve(PromptReply::Proceed);
    }

    /// UI handler entry point: the user dismissed the rationale (or
    /// merely opened settings, which resolves nothing by itself).
    pub fn dismiss_prompt(&self) {
        self.slot.resolve(PromptReply::Dismiss);
    }

    /// Ensure the given permissions are usable, prompting at most once
    /// per explainer key per process lifetime.
    ///
    /// Never panics and never propagates OS errors; the answer is always
    /// a plain boolean.
    pub async fn ensure_permissions(&self, request: PermissionRequest) -> bool {
        if !self.os.runtime_gated() {
            // No runtime permission model on this platform; nothing to
            // check, nothing to show.
            return true;
        }

        if self.all_granted(&request.permissions).await {
            return true;
        }

        let key = request.memory_key();
        if self.explained_keys.lock().contains(&key) {
            debug!(key = %key, "rationale already shown, requesting directly");
            return self.request_all(&request.permissions).await;
        }

        let permissions = request.permissions.clone();
        let reply_rx = match self.slot.open(request) {
            Ok(rx) => rx,
            Err(_) => {
                // Overlapping ask while a prompt is pending; resolve this
                // caller false instead of stealing the pending slot. The
                // key stays unexplained: this caller never rendered the
                // rationale.
                return false;
            }
        };

        // The prompt is now on screen; a dismissal from here on still
        // counts as explained.
        self.explained_keys.lock().insert(key);

        match reply_rx.await {
            Ok(PromptReply::Proceed) => self.request_all(&permissions).await,
            Ok(PromptReply::Dismiss) | Err(_) => false,
        }
    }

    async fn all_granted(&self, permissions: &[String]) -> bool {
        for permission in permissions {
            match self.os.check(permission).await {
                Ok(true) => {}
                Ok(false) => return false,
                Err(err) => {
                    warn!(permission = %permission, error = %err, "permission check failed");
                    return false;
                }
            }
        }
        true
    }

    async fn request_all(&self, permissions: &[String]) -> bool {
        match self.os.request(permissions).await {
            Ok(results) => permissions
                .iter()
                .all(|p| results.get(p).is_some_and(|status| status.is_granted())),
            Err(err) => {
                // Denial must never crash a UI action.
                warn!(error = %err, "permission request failed");
                false
            }
        }
    }
}
