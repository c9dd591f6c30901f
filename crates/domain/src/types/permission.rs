//! Permission request types consumed by the broker.

use serde::{Deserialize, Serialize};

/// Outcome of an OS-level permission check or request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// One logical permission ask: the named OS permissions plus the
/// human-readable rationale shown before the first OS request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRequest {
    pub permissions: Vec<String>,
    pub title: String,
    pub description: String,
    /// Identity under which "rationale already shown" is remembered.
    /// Defaults to the joined permission names so independent call sites
    /// asking for the same set share one memory entry.
    pub explainer_key: Option<String>,
    pub primary_label: Option<String>,
    pub secondary_label: Option<String>,
    pub show_open_settings: bool,
}

impl PermissionRequest {
    #[must_use]
    pub fn new(
        permissions: impl IntoIterator<Item = impl Into<String>>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            title: title.into(),
            description: description.into(),
            explainer_key: None,
            primary_label: None,
            secondary_label: None,
            show_open_settings: true,
        }
    }

    #[must_use]
    pub fn explainer_key(mut self, key: impl Into<String>) -> Self {
        self.explainer_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn labels(mut self, primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        self.primary_label = Some(primary.into());
        self.secondary_label = Some(secondary.into());
        self
    }

    #[must_use]
    pub fn show_open_settings(mut self, show: bool) -> Self {
        self.show_open_settings = show;
        self
    }

    /// The key under which the explain-once memory tracks this request.
    #[must_use]
    pub fn memory_key(&self) -> String {
        match &self.explainer_key {
            Some(key) => key.clone(),
            None => self.permissions.join("|"),
        }
    }
}
