//! Session lifecycle: the credential bundle and everything that reads it.

mod manager;
mod ports;

pub use manager::SessionManager;
pub use ports::{AccessTokenProvider, CredentialStore, Navigator, Notifier, Route, ToastKind};
