//! The `{success, message, data}` wrapper every backend response uses.

use serde::{Deserialize, Serialize};

fn success_default() -> bool {
    // A body without an explicit `success` field is treated as successful;
    // only a present-and-false flag marks a domain rejection.
    true
}

/// Standard response envelope.
///
/// `success`, not the HTTP status code, is the primary outcome signal for
/// answered exchanges. The pipeline resolves envelopes with
/// `success: false` so callers can branch on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    #[serde(default = "success_default")]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Server-provided message, or the given fallback when absent/empty.
    #[must_use]
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.message.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => fallback,
        }
    }

    /// Unpack a successful envelope into its payload.
    ///
    /// Returns the fallback-resolved message as the error value when the
    /// envelope is a rejection or the payload is missing.
    pub fn into_data(self, fallback: &str) -> std::result::Result<T, String> {
        if !self.success {
            return Err(self.message_or(fallback).to_string());
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(self.message_or(fallback).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Payload {
        value: i32,
    }

    #[test]
    fn missing_success_field_defaults_to_true() {
        let env: Envelope<Payload> =
            serde_json::from_str(r#"{"data":{"value":1}}"#).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(Payload { value: 1 }));
    }

    #[test]
    fn explicit_false_is_preserved() {
        let env: Envelope<Payload> =
            serde_json::from_str(r#"{"success":false,"message":"Invalid OTP"}"#).unwrap();
        assert!(!env.success);
        assert_eq!(env.message.as_deref(), Some("Invalid OTP"));
    }

    #[test]
    fn message_or_falls_back_when_absent_or_empty() {
        let absent: Envelope<Payload> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(absent.message_or("fallback"), "fallback");

        let empty: Envelope<Payload> =
            serde_json::from_str(r#"{"success":false,"message":""}"#).unwrap();
        assert_eq!(empty.message_or("fallback"), "fallback");
    }

    #[test]
    fn into_data_rejects_missing_payload() {
        let env: Envelope<Payload> =
            serde_json::from_str(r#"{"success":true,"message":"ok"}"#).unwrap();
        assert_eq!(env.into_data("missing"), Err("ok".to_string()));
    }
}
