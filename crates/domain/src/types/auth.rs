//! Credential bundle and auth endpoint payload shapes.

use serde::{Deserialize, Serialize};

/// Access/refresh token pair as issued by the backend.
///
/// The two tokens travel together: a response that updates one updates
/// both, or neither is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// The authenticated user as the backend describes it.
///
/// Only the fields the client core reads are typed; the rest rides along
/// in `extra` so a profile-shape change on the server never breaks
/// credential persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Everything the client persists about the current session.
///
/// Created after a successful authenticate/verify/refresh response and
/// cleared as a unit on logout, deactivation, or unrecoverable auth
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialBundle {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

impl CredentialBundle {
    #[must_use]
    pub fn new(tokens: TokenPair, user: User) -> Self {
        Self { access_token: tokens.access_token, refresh_token: tokens.refresh_token, user }
    }
}

/// `data` payload of register/login/refresh responses: tokens at the
/// top level next to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthData {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthData {
    /// Convert into a credential bundle ready for the store.
    #[must_use]
    pub fn into_bundle(self) -> CredentialBundle {
        CredentialBundle {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            user: self.user.unwrap_or_default(),
        }
    }
}

/// `data` payload of the verify-OTP response: tokens nested under a
/// `tokens` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyData {
    pub tokens: TokenPair,
    #[serde(default)]
    pub user: Option<User>,
}

impl VerifyData {
    #[must_use]
    pub fn into_bundle(self) -> CredentialBundle {
        CredentialBundle::new(self.tokens, self.user.unwrap_or_default())
    }
}
