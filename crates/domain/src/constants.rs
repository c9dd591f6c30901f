//! Client-wide constants

use std::time::Duration;

/// Default backend host. Overridable through `ClientConfig`.
pub const DEFAULT_BASE_URL: &str = "https://api.rishta.app";

/// Every endpoint path is relative to `{base_url}/api/v1/`.
pub const API_PREFIX: &str = "api/v1/";

/// Calls slower than this emit a warning diagnostic. Observability only;
/// never aborts the call.
pub const SLOW_CALL_THRESHOLD: Duration = Duration::from_secs(5);

/// Country code prefixed to phone numbers before they leave the client.
pub const COUNTRY_CODE_PREFIX: &str = "+91";

/// Local phone number length expected before prefixing.
pub const PHONE_NUMBER_LEN: usize = 10;

/// OTP code length.
pub const OTP_LEN: usize = 6;

/// Cooldown before a new OTP may be requested for the same number.
pub const OTP_RESEND_COOLDOWN: Duration = Duration::from_secs(60);

/// Storage slot keys for the persisted credential bundle.
pub mod storage_keys {
    pub const ACCESS_TOKEN: &str = "rishta.access_token";
    pub const REFRESH_TOKEN: &str = "rishta.refresh_token";
    pub const USER_DATA: &str = "rishta.user_data";
}
