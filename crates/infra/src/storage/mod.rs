//! Credential store backends.
//!
//! The keyring backend persists the bundle in the platform keychain
//! (macOS Keychain, Windows Credential Manager, Linux Secret Service);
//! the in-memory backend exists for tests and ephemeral sessions.

mod keyring;
mod memory;

pub use keyring::KeyringCredentialStore;
pub use memory::MemoryCredentialStore;
