//! Single-slot prompt mediator.
//!
//! The rationale modal is imperative on the UI side: it becomes visible,
//! then some handler fires. This slot bridges that into one awaitable
//! reply per request. At most one prompt is in flight; a second `open`
//! while one is pending is refused rather than orphaning the first
//! caller's receiver.

use parking_lot::Mutex;
use rishta_domain::PermissionRequest;
use tokio::sync::oneshot;
use tracing::warn;

/// What the user did with the rationale prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptReply {
    /// Primary action: go ahead and ask the OS.
    Proceed,
    /// Secondary action or dismissal: stop without asking the OS.
    Dismiss,
}

/// Error returned when a prompt is already pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a permission prompt is already pending")]
pub struct SlotBusy;

struct Pending {
    request: PermissionRequest,
    reply_tx: oneshot::Sender<PromptReply>,
}

/// Holds the one in-flight rationale prompt.
#[derive(Default)]
pub struct PromptSlot {
    pending: Mutex<Option<Pending>>,
}

impl PromptSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a request in the slot and get the receiver its reply will
    /// arrive on.
    ///
    /// # Errors
    /// `SlotBusy` when a prompt is already pending; the pending prompt
    /// is left untouched.
    pub fn open(&self, request: PermissionRequest) -> Result<oneshot::Receiver<PromptReply>, SlotBusy> {
        let mut pending = self.pending.lock();
        if pending.is_some() {
            warn!("permission prompt refused: one is already pending");
            return Err(SlotBusy);
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        *pending = Some(Pending { request, reply_tx });
        Ok(reply_rx)
    }

    /// The request the UI should currently be rendering, if any.
    #[must_use]
    pub fn pending_request(&self) -> Option<PermissionRequest> {
        self.pending.lock().as_ref().map(|p| p.request.clone())
    }

    /// Resolve the pending prompt from a UI handler.
    ///
    /// Returns `false` when nothing was pending (stale handler fire);
    /// that is not an error.
    pub fn resolve(&self, reply: PromptReply) -> bool {
        let Some(pending) = self.pending.lock().take() else {
            return false;
        };
        // The receiver may have been dropped; the caller then already
        // observed a dismissal, so a send failure is not interesting.
        pending.reply_tx.send(reply).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PermissionRequest {
        PermissionRequest::new(["CAMERA"], "Camera access", "Needed for profile photos")
    }

    #[tokio::test]
    async fn open_then_resolve_delivers_reply() {
        let slot = PromptSlot::new();
        let rx = slot.open(request()).unwrap();

        assert!(slot.pending_request().is_some());
        assert!(slot.resolve(PromptReply::Proceed));
        assert_eq!(rx.await.unwrap(), PromptReply::Proceed);
        assert!(slot.pending_request().is_none());
    }

    #[tokio::test]
    async fn second_open_is_refused_and_first_survives() {
        let slot = PromptSlot::new();
        let rx = slot.open(request()).unwrap();

        assert_eq!(slot.open(request()).unwrap_err(), SlotBusy);

        // First caller still gets its reply.
        assert!(slot.resolve(PromptReply::Dismiss));
        assert_eq!(rx.await.unwrap(), PromptReply::Dismiss);
    }

    #[test]
    fn resolve_without_pending_is_a_noop() {
        let slot = PromptSlot::new();
        assert!(!slot.resolve(PromptReply::Dismiss));
    }

    #[tokio::test]
    async fn slot_is_reusable_after_resolution() {
        let slot = PromptSlot::new();
        let rx1 = slot.open(request()).unwrap();
        slot.resolve(PromptReply::Dismiss);
        rx1.await.unwrap();

        let rx2 = slot.open(request()).unwrap();
        slot.resolve(PromptReply::Proceed);
        assert_eq!(rx2.await.unwrap(), PromptReply::Proceed);
    }
}
