//! Platform-keychain credential store.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use keyring::Entry;
use rishta_domain::constants::storage_keys;
use rishta_domain::{CredentialBundle, Result, RishtaError, User};
use rishta_core::CredentialStore;
use tracing::{debug, warn};

const DEFAULT_SERVICE: &str = "rishta";

/// Stores the credential bundle as three keychain entries under one
/// service name: access token, refresh token, and the user document as
/// JSON.
///
/// The keychain offers no multi-entry transaction, so each token entry
/// carries a write-generation stamp shared by the pair. A save that
/// dies between the two token writes leaves mismatched stamps, and
/// `load` treats that the same as no session at all: the token pair is
/// trusted together or not at all.
pub struct KeyringCredentialStore {
    service_name: String,
}

impl KeyringCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_service(DEFAULT_SERVICE)
    }

    /// Use a custom service name. Lets tests and side-by-side installs
    /// keep separate entries.
    pub fn with_service(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service_name, key)
            .map_err(|err| RishtaError::Storage(format!("keychain entry for {key}: {err}")))
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(RishtaError::Storage(format!("keychain read for {key}: {err}"))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|err| RishtaError::Storage(format!("keychain write for {key}: {err}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(RishtaError::Storage(format!("keychain delete for {key}: {err}"))),
        }
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for KeyringCredentialStore {
    async fn load(&self) -> Result<Option<CredentialBundle>> {
        let access_raw = self.read(storage_keys::ACCESS_TOKEN)?;
        let refresh_raw = self.read(storage_keys::REFRESH_TOKEN)?;

        // Half a token pair is as good as none.
        let (Some(access_raw), Some(refresh_raw)) = (access_raw, refresh_raw) else {
            debug!("no complete credential pair in keychain");
            return Ok(None);
        };

        let Some((access_token, refresh_token)) = paired_tokens(&access_raw, &refresh_raw)
        else {
            warn!("stored token pair is from different writes, ignoring it");
            return Ok(None);
        };

        let user = match self.read(storage_keys::USER_DATA)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "stored user document unreadable, starting blank");
                User::default()
            }),
            None => User::default(),
        };

        Ok(Some(CredentialBundle { access_token, refresh_token, user }))
    }

    async fn save(&self, bundle: &CredentialBundle) -> Result<()> {
        let generation = next_generation();
        self.write(storage_keys::ACCESS_TOKEN, &stamp_token(&generation, &bundle.access_token))?;
        self.write(
            storage_keys::REFRESH_TOKEN,
            &stamp_token(&generation, &bundle.refresh_token),
        )?;
        let user = serde_json::to_string(&bundle.user)
            .map_err(|err| RishtaError::Storage(format!("serialize user document: {err}")))?;
        self.write(storage_keys::USER_DATA, &user)?;
        debug!("credential bundle stored in keychain");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.remove(storage_keys::ACCESS_TOKEN)?;
        self.remove(storage_keys::REFRESH_TOKEN)?;
        self.remove(storage_keys::USER_DATA)?;
        debug!("credential bundle cleared from keychain");
        Ok(())
    }
}

fn next_generation() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    nanos.to_string()
}

fn stamp_token(generation: &str, token: &str) -> String {
    format!("{generation}\n{token}")
}

/// Recover the token pair from two stamped entries.
///
/// `None` unless both entries carry a stamp and the stamps match; a
/// mismatch means the writes came from different saves and the pair
/// cannot be trusted.
fn paired_tokens(access_raw: &str, refresh_raw: &str) -> Option<(String, String)> {
    let (access_generation, access_token) = access_raw.split_once('\n')?;
    let (refresh_generation, refresh_token) = refresh_raw.split_once('\n')?;
    if access_generation != refresh_generation {
        return None;
    }
    Some((access_token.to_owned(), refresh_token.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_from_the_same_save_pair_up() {
        let generation = next_generation();
        let access = stamp_token(&generation, "A1");
        let refresh = stamp_token(&generation, "R1");
        assert_eq!(
            paired_tokens(&access, &refresh),
            Some(("A1".to_owned(), "R1".to_owned()))
        );
    }

    #[test]
    fn tokens_from_different_saves_are_rejected() {
        // A save that died between the two token writes leaves the new
        // access token beside the previous refresh token.
        let access = stamp_token("2001", "A2");
        let refresh = stamp_token("2000", "R1");
        assert_eq!(paired_tokens(&access, &refresh), None);
    }

    #[test]
    fn unstamped_entries_are_rejected() {
        let generation = next_generation();
        assert_eq!(paired_tokens("A1", &stamp_token(&generation, "R1")), None);
        assert_eq!(paired_tokens(&stamp_token(&generation, "A1"), "R1"), None);
    }

    #[test]
    fn tokens_survive_embedded_newlines_in_the_value() {
        let generation = next_generation();
        let access = stamp_token(&generation, "A1\nA1-continued");
        let refresh = stamp_token(&generation, "R1");
        let (access_token, _) = paired_tokens(&access, &refresh).unwrap();
        assert_eq!(access_token, "A1\nA1-continued");
    }

    #[test]
    fn generations_are_monotonic_enough_to_differ() {
        let first = next_generation();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let second = next_generation();
        assert_ne!(first, second);
    }
}
