//! # Rishta Domain
//!
//! Shared types for the client core - no I/O, no async, no framework
//! dependencies.
//!
//! This crate contains:
//! - The response envelope and auth payload shapes used on the wire
//! - Credential bundle and permission request types
//! - Error types and the shared `Result` alias
//! - Client-wide constants (endpoints prefix, thresholds, storage keys)

pub mod constants;
pub mod errors;
pub mod types;

pub use errors::{ActionError, Result, RishtaError};
pub use types::auth::{AuthData, CredentialBundle, TokenPair, User, VerifyData};
pub use types::envelope::Envelope;
pub use types::permission::{PermissionRequest, PermissionStatus};
pub use types::profile::{PhotoFile, RegistrationForm};
pub use types::search::SearchFilters;
