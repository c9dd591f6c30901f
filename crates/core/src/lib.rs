//! # Rishta Core
//!
//! Coordination logic behind port traits - no HTTP, no storage backends,
//! no UI framework.
//!
//! This crate contains:
//! - The session manager (credential bundle lifecycle, token access)
//! - The OTP login flow state machine and its driving service
//! - The permission broker with its single-flight prompt slot
//!
//! ## Architecture Principles
//! - Only depends on `rishta-domain`
//! - All external collaborators (storage, backend, UI) via traits
//! - Deterministic from the caller's point of view: every async entry
//!   point resolves or rejects exactly once

pub mod auth;
pub mod permissions;
pub mod session;

pub use auth::{AuthGateway, LoginFlowService, OtpLoginFlow, OtpLoginState};
pub use permissions::{
    PermissionBroker, PermissionsApi, PromptReply, PromptSlot, SlotBusy,
};
pub use session::{
    AccessTokenProvider, CredentialStore, Navigator, Notifier, Route, SessionManager, ToastKind,
};
