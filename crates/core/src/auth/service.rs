//! Drives the OTP login flow against the backend and the session.
//!
//! Ordering matters here: the credential store write is awaited before
//! the home navigation fires, so the UI can never land on an
//! authenticated screen with an unauthenticated session.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use rishta_domain::constants::COUNTRY_CODE_PREFIX;
use rishta_domain::{ActionError, Envelope, Result, RishtaError, VerifyData};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::flow::{OtpLoginFlow, OtpLoginState};
use crate::session::{Navigator, Notifier, Route, SessionManager, ToastKind};

/// Backend calls the login flow needs. Implemented by the endpoint
/// action layer; mocked in tests.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Request an OTP for the (already prefixed) phone number.
    async fn send_otp(&self, phone: &str) -> Result<Envelope<serde_json::Value>>;

    /// Verify an OTP for the (already prefixed) phone number.
    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<Envelope<VerifyData>>;
}

/// Coordinates the OTP login state machine, the auth gateway, the
/// session manager, and the UI collaborators.
pub struct LoginFlowService {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    flow: Mutex<OtpLoginFlow>,
}

impl LoginFlowService {
    #[must_use]
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { gateway, session, notifier, navigator, flow: Mutex::new(OtpLoginFlow::new()) }
    }

    /// Snapshot of the flow state.
    pub async fn state(&self) -> OtpLoginState {
        self.flow.lock().await.state().clone()
    }

    /// Whether a send/resend is available right now.
    pub async fn can_send(&self, now: Instant) -> bool {
        self.flow.lock().await.can_send(now)
    }

    /// Request an OTP for a local 10-digit number.
    ///
    /// On success the flow moves to `OtpRequested` and the resend
    /// cooldown starts. Invalid input and cooldown gating return errors
    /// without a notification (the form disables those paths); send
    /// failures notify exactly once.
    ///
    /// # Errors
    /// `Rejected` when the server answered `success: false`; `Failed` on
    /// invalid input, cooldown gating, or transport problems.
    pub async fn request_otp(
        &self,
        phone: &str,
        now: Instant,
    ) -> std::result::Result<(), ActionError> {
        if !OtpLoginFlow::is_valid_phone(phone) {
            return Err(RishtaError::InvalidInput("phone must be 10 digits".into()).into());
        }

        {
            let flow = self.flow.lock().await;
            if !flow.can_send(now) {
                return Err(RishtaError::InvalidInput("resend not available yet".into()).into());
            }
        }

        let prefixed = format!("{COUNTRY_CODE_PREFIX}{phone}");
        match self.gateway.send_otp(&prefixed).await {
            Ok(envelope) if envelope.success => {
                self.flow.lock().await.otp_sent(phone.to_string(), now);
                self.notifier
                    .notify(ToastKind::Success, envelope.message_or("OTP sent successfully"));
                Ok(())
            }
            Ok(envelope) => {
                let message = envelope.message_or("Failed to send OTP").to_string();
                self.notifier.notify(ToastKind::Error, &message);
                Err(ActionError::Rejected(message))
            }
            Err(err) => {
                warn!(error = %err, "send OTP failed");
                self.notifier.notify(ToastKind::Error, "Failed to send OTP");
                Err(err.into())
            }
        }
    }

    /// Verify the supplied 6-digit OTP.
    ///
    /// On success the credential bundle is stored (awaited) and only
    /// then the navigator moves to Home. Any failure falls back to
    /// `OtpRequested` with one notification.
    ///
    /// # Errors
    /// `Rejected` when the server answered `success: false`; `Failed` on
    /// invalid input or transport problems.
    pub async fn verify(&self, otp: &str) -> std::result::Result<(), ActionError> {
        if !OtpLoginFlow::is_valid_otp(otp) {
            return Err(RishtaError::InvalidInput("OTP must be 6 digits".into()).into());
        }

        let phone = {
            let mut flow = self.flow.lock().await;
            flow.begin_verify().ok_or_else(|| {
                ActionError::from(RishtaError::InvalidInput("no OTP outstanding".into()))
            })?
        };

        let prefixed = format!("{COUNTRY_CODE_PREFIX}{phone}");
        match self.gateway.verify_otp(&prefixed, otp).await {
            Ok(envelope) if envelope.success => match envelope.data {
                Some(data) => {
                    let message =
                        envelope.message.clone().unwrap_or_else(|| "Login successful".into());
                    self.complete_login(data, &message).await
                }
                None => {
                    self.flow.lock().await.verify_failed();
                    self.notifier.notify(ToastKind::Error, "OTP verification failed");
                    Err(ActionError::Rejected("OTP verification failed".into()))
                }
            },
            Ok(envelope) => {
                self.flow.lock().await.verify_failed();
                let message = envelope.message_or("Invalid OTP").to_string();
                self.notifier.notify(ToastKind::Error, &message);
                Err(ActionError::Rejected(message))
            }
            Err(err) => {
                warn!(error = %err, "verify OTP failed");
                self.flow.lock().await.verify_failed();
                self.notifier.notify(ToastKind::Error, "OTP verification failed");
                Err(err.into())
            }
        }
    }

    async fn complete_login(
        &self,
        data: VerifyData,
        message: &str,
    ) -> std::result::Result<(), ActionError> {
        // Store write must finish before anything depends on the session.
        if let Err(err) = self.session.establish(data.into_bundle()).await {
            warn!(error = %err, "failed to persist credentials");
            self.flow.lock().await.verify_failed();
            self.notifier.notify(ToastKind::Error, "OTP verification failed");
            return Err(err.into());
        }

        self.flow.lock().await.authenticated();
        self.notifier.notify(ToastKind::Success, message);
        self.navigator.navigate(Route::Home);
        debug!("login flow authenticated");
        Ok(())
    }

    /// "Change number": discard the outstanding OTP and its timer.
    pub async fn change_number(&self) {
        self.flow.lock().await.change_number();
    }
}
