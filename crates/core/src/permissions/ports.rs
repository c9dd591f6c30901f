//! Port interface for the OS permission API.

use std::collections::HashMap;

use async_trait::async_trait;
use rishta_domain::{PermissionStatus, Result};

/// The OS-level permission surface the broker consumes.
///
/// Mirrors the runtime-permission contract: a cheap synchronous-style
/// check per permission and a batched request that returns a status per
/// name.
#[async_trait]
pub trait PermissionsApi: Send + Sync {
    /// Whether this platform gates the capability behind a runtime
    /// grant at all. When `false` the broker answers `true` without
    /// touching the rest of this trait.
    fn runtime_gated(&self) -> bool;

    /// Check a single permission without prompting the user.
    async fn check(&self, permission: &str) -> Result<bool>;

    /// Ask the OS to request the given permissions; the OS shows its own
    /// dialog. Returns the resulting status per permission name.
    async fn request(&self, permissions: &[String]) -> Result<HashMap<String, PermissionStatus>>;
}
