//! OTP login state machine.
//!
//! `Idle -> OtpRequested -> Verifying -> Authenticated`, with any verify
//! failure falling back to `OtpRequested` and "change number" discarding
//! the requested state entirely. Time is passed in by the caller so the
//! resend cooldown is testable without sleeping.

use std::time::Instant;

use rishta_domain::constants::{OTP_LEN, OTP_RESEND_COOLDOWN, PHONE_NUMBER_LEN};

/// Where the login flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpLoginState {
    Idle,
    /// An OTP has been sent; resend is gated by the cooldown.
    OtpRequested { phone: String, resend_available_at: Instant },
    /// A verify call is in flight. The resend deadline rides along so a
    /// failed attempt restores it unchanged.
    Verifying { phone: String, resend_available_at: Instant },
    Authenticated,
}

/// Pure state machine for the OTP login flow.
#[derive(Debug)]
pub struct OtpLoginFlow {
    state: OtpLoginState,
}

impl Default for OtpLoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OtpLoginFlow {
    #[must_use]
    pub fn new() -> Self {
        Self { state: OtpLoginState::Idle }
    }

    #[must_use]
    pub fn state(&self) -> &OtpLoginState {
        &self.state
    }

    /// A local phone number is acceptable when it is exactly 10 digits.
    #[must_use]
    pub fn is_valid_phone(phone: &str) -> bool {
        phone.len() == PHONE_NUMBER_LEN && phone.chars().all(|c| c.is_ascii_digit())
    }

    /// An OTP is acceptable when it is exactly 6 digits.
    #[must_use]
    pub fn is_valid_otp(otp: &str) -> bool {
        otp.len() == OTP_LEN && otp.chars().all(|c| c.is_ascii_digit())
    }

    /// Whether a new send-OTP call may be issued right now.
    ///
    /// True in `Idle` (first send) and in `OtpRequested` once the
    /// cooldown has elapsed.
    #[must_use]
    pub fn can_send(&self, now: Instant) -> bool {
        match &self.state {
            OtpLoginState::Idle => true,
            OtpLoginState::OtpRequested { resend_available_at, .. } => now >= *resend_available_at,
            OtpLoginState::Verifying { .. } | OtpLoginState::Authenticated => false,
        }
    }

    /// Record a successful send-OTP response; starts the resend cooldown.
    pub fn otp_sent(&mut self, phone: String, now: Instant) {
        self.state = OtpLoginState::OtpRequested {
            phone,
            resend_available_at: now + OTP_RESEND_COOLDOWN,
        };
    }

    /// Move into the in-flight verify state.
    ///
    /// Returns the phone the OTP was sent to, or `None` when no OTP is
    /// outstanding.
    pub fn begin_verify(&mut self) -> Option<String> {
        match &self.state {
            OtpLoginState::OtpRequested { phone, resend_available_at } => {
                let phone = phone.clone();
                self.state = OtpLoginState::Verifying {
                    phone: phone.clone(),
                    resend_available_at: *resend_available_at,
                };
                Some(phone)
            }
            _ => None,
        }
    }

    /// A verify attempt failed; fall back to `OtpRequested` so the user
    /// can retype or wait for resend. The cooldown is not restarted.
    pub fn verify_failed(&mut self) {
        if let OtpLoginState::Verifying { phone, resend_available_at } = &self.state {
            self.state = OtpLoginState::OtpRequested {
                phone: phone.clone(),
                resend_available_at: *resend_available_at,
            };
        }
    }

    /// Verification succeeded.
    pub fn authenticated(&mut self) {
        self.state = OtpLoginState::Authenticated;
    }

    /// "Change number": discard the requested state and its timer.
    pub fn change_number(&mut self) {
        self.state = OtpLoginState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn phone_and_otp_validation() {
        assert!(OtpLoginFlow::is_valid_phone("9999999999"));
        assert!(!OtpLoginFlow::is_valid_phone("999999999"));
        assert!(!OtpLoginFlow::is_valid_phone("99999999ab"));
        assert!(OtpLoginFlow::is_valid_otp("000000"));
        assert!(!OtpLoginFlow::is_valid_otp("00000"));
        assert!(!OtpLoginFlow::is_valid_otp("12345x"));
    }

    #[test]
    fn resend_gated_for_sixty_seconds() {
        let mut flow = OtpLoginFlow::new();
        let t0 = Instant::now();

        assert!(flow.can_send(t0));
        flow.otp_sent("9999999999".into(), t0);

        assert!(!flow.can_send(t0 + Duration::from_secs(59)));
        assert!(flow.can_send(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn verify_failure_returns_to_requested() {
        let mut flow = OtpLoginFlow::new();
        let t0 = Instant::now();
        flow.otp_sent("9999999999".into(), t0);

        let phone = flow.begin_verify().unwrap();
        assert_eq!(phone, "9999999999");

        flow.verify_failed();
        assert!(matches!(flow.state(), OtpLoginState::OtpRequested { .. }));
        assert!(!flow.can_send(t0 + Duration::from_secs(30)));

        // Retry is possible immediately.
        assert!(flow.begin_verify().is_some());
    }

    #[test]
    fn change_number_resets_the_timer() {
        let mut flow = OtpLoginFlow::new();
        let t0 = Instant::now();
        flow.otp_sent("9999999999".into(), t0);

        flow.change_number();
        assert_eq!(*flow.state(), OtpLoginState::Idle);
        assert!(flow.can_send(t0));
    }

    #[test]
    fn begin_verify_needs_an_outstanding_otp() {
        let mut flow = OtpLoginFlow::new();
        assert!(flow.begin_verify().is_none());

        flow.authenticated();
        assert!(flow.begin_verify().is_none());
    }
}
