//! Port interfaces for session persistence and the UI-facing collaborators.
//!
//! These traits define the boundaries between core coordination logic and
//! the storage/UI implementations that live outside this crate.

use async_trait::async_trait;
use rishta_domain::{CredentialBundle, Result};

/// Persistence contract for the credential bundle.
///
/// The bundle is saved and cleared as a unit: implementations must never
/// expose a state where the access token and refresh token come from
/// different writes.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the persisted bundle, if any.
    ///
    /// A partially-written bundle (one token present, the other missing)
    /// must load as `None`.
    async fn load(&self) -> Result<Option<CredentialBundle>>;

    /// Persist the bundle, replacing whatever was stored before.
    async fn save(&self, bundle: &CredentialBundle) -> Result<()>;

    /// Remove everything. Idempotent.
    async fn clear(&self) -> Result<()>;
}

/// Yields the bearer token attached to outbound requests.
///
/// `None` means the call proceeds unauthenticated; the backend, not the
/// client, enforces auth.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

/// Navigation targets the client core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
}

/// Navigation collaborator. Implementations decide what "navigate" and
/// "reset" mean for their UI stack.
pub trait Navigator: Send + Sync {
    /// Push the given route.
    fn navigate(&self, route: Route);

    /// Reset the stack so the given route is the only entry.
    fn reset(&self, route: Route);

    /// Return to the previous screen.
    fn go_back(&self);
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

/// User-notification collaborator (toast rendering lives outside).
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: ToastKind, message: &str);
}
