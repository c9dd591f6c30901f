//! Account lifecycle endpoints: registration, login, OTP, token
//! refresh, and the teardown pair (logout / deactivate).

use std::sync::Arc;

use async_trait::async_trait;
use rishta_domain::constants::COUNTRY_CODE_PREFIX;
use rishta_domain::{
    ActionError, AuthData, CredentialBundle, Envelope, RegistrationForm, Result, VerifyData,
};
use rishta_core::{AuthGateway, Navigator, Notifier, Route, SessionManager, ToastKind};
use serde_json::json;
use tracing::{info, warn};

use super::client::{ApiClient, MultipartForm, RequestOptions};

const REGISTER: &str = "auth/register";
const LOGIN: &str = "auth/login";
const SEND_OTP: &str = "auth/otp/send";
const VERIFY_OTP: &str = "auth/otp/verify";
const REFRESH_TOKEN: &str = "auth/refresh-token";
const LOGOUT: &str = "auth/logout";
const DEACTIVATE: &str = "auth/deactivate";

/// Auth endpoint actions. Also serves as the [`AuthGateway`] the OTP
/// login flow calls through.
pub struct AuthApi {
    client: Arc<ApiClient>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl AuthApi {
    #[must_use]
    pub fn new(
        client: Arc<ApiClient>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { client, session, notifier, navigator }
    }

    /// Submit a registration form with its photos as one multipart
    /// request. On success any issued credentials are stored, the
    /// backend message is surfaced, and the UI moves to the login
    /// screen.
    ///
    /// # Errors
    /// Rejected when the backend answers `success: false`; `Failed`
    /// on transport or HTTP-level errors. Either way exactly one
    /// notification fires.
    pub async fn register(&self, form: RegistrationForm) -> std::result::Result<(), ActionError> {
        let mut multipart = MultipartForm::new()
            .text("email", form.email)
            .text("phone", format!("{COUNTRY_CODE_PREFIX}{}", form.phone))
            .text("password", form.password)
            .text("fullName", form.full_name)
            .text("age", form.age)
            .text("dateOfBirth", form.date_of_birth)
            .text("gender", form.gender)
            .text("city", form.city)
            .text("occupation", form.occupation)
            .text("currentState", form.current_state);
        for photo in form.photos {
            multipart = multipart.file("photos", photo);
        }

        let envelope: Envelope<AuthData> = self
            .client
            .post_multipart(REGISTER, multipart, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            let message = envelope.message_or("Registration successful").to_owned();
            if let Some(data) = envelope.data {
                self.session.establish(data.into_bundle()).await.map_err(|err| {
                    self.notifier.notify(ToastKind::Error, &err.to_string());
                    ActionError::Failed(err)
                })?;
            }
            self.notifier.notify(ToastKind::Success, &message);
            self.navigator.navigate(Route::Login);
            Ok(())
        } else {
            let message = envelope.message_or("Registration failed").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    /// Password login. Stores the issued credentials and moves to the
    /// home screen on success.
    ///
    /// # Errors
    /// Rejected when the backend declines the credentials; `Failed` on
    /// transport or HTTP-level errors.
    pub async fn login(&self, email: &str, password: &str) -> std::result::Result<(), ActionError> {
        let body = json!({ "email": email, "password": password });
        let envelope: Envelope<AuthData> = self
            .client
            .post(LOGIN, &body, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        let message = envelope.message_or("Invalid credentials").to_owned();
        match (envelope.success, envelope.data) {
            (true, Some(data)) => {
                self.session.establish(data.into_bundle()).await.map_err(|err| {
                    self.notifier.notify(ToastKind::Error, &err.to_string());
                    ActionError::Failed(err)
                })?;
                self.navigator.navigate(Route::Home);
                Ok(())
            }
            _ => {
                self.notifier.notify(ToastKind::Error, &message);
                Err(ActionError::Rejected(message))
            }
        }
    }

    /// Exchange the stored refresh token for a fresh pair. Both tokens
    /// are replaced together; the cached user survives when the
    /// backend omits it.
    ///
    /// # Errors
    /// `Failed(Auth)` when no refresh token is stored; otherwise the
    /// usual rejection/failure split.
    pub async fn refresh_session(&self) -> std::result::Result<(), ActionError> {
        let Some(refresh_token) = self.session.refresh_token().await else {
            return Err(rishta_domain::RishtaError::Auth(
                "no refresh token available".to_owned(),
            )
            .into());
        };

        let body = json!({ "refreshToken": refresh_token });
        let envelope: Envelope<AuthData> =
            self.client.post(REFRESH_TOKEN, &body, &RequestOptions::logged()).await.map_err(
                |err| {
                    self.notifier.notify(ToastKind::Error, &err.to_string());
                    ActionError::Failed(err)
                },
            )?;

        let message = envelope.message_or("Session refresh failed").to_owned();
        match (envelope.success, envelope.data) {
            (true, Some(data)) => {
                let user = match data.user {
                    Some(user) => user,
                    None => self.session.user().await.unwrap_or_default(),
                };
                let bundle = CredentialBundle {
                    access_token: data.access_token,
                    refresh_token: data.refresh_token,
                    user,
                };
                self.session.establish(bundle).await.map_err(|err| {
                    self.notifier.notify(ToastKind::Error, &err.to_string());
                    ActionError::Failed(err)
                })?;
                info!("session refreshed");
                Ok(())
            }
            _ => {
                self.notifier.notify(ToastKind::Error, &message);
                Err(ActionError::Rejected(message))
            }
        }
    }

    /// Log out. The server call is best effort; local credentials are
    /// cleared and the navigation stack is reset to login no matter
    /// how it goes.
    pub async fn logout(&self) {
        let refresh_token = self.session.refresh_token().await;
        let body = json!({ "refreshToken": refresh_token });
        let outcome: Result<Envelope<serde_json::Value>> =
            self.client.post(LOGOUT, &body, &RequestOptions::logged()).await;
        if let Err(err) = outcome {
            warn!(error = %err, "logout call failed, tearing down locally anyway");
        }
        self.teardown().await;
    }

    /// Deactivate the account, then tear the session down exactly as
    /// logout does.
    pub async fn deactivate_account(&self) {
        let outcome: Result<Envelope<serde_json::Value>> =
            self.client.post(DEACTIVATE, &json!({}), &RequestOptions::logged()).await;
        match outcome {
            Ok(envelope) => {
                self.notifier
                    .notify(ToastKind::Info, envelope.message_or("Account deactivated"));
            }
            Err(err) => {
                warn!(error = %err, "deactivate call failed, tearing down locally anyway");
            }
        }
        self.teardown().await;
    }

    async fn teardown(&self) {
        if let Err(err) = self.session.clear().await {
            warn!(error = %err, "credential store clear failed during teardown");
        }
        self.navigator.reset(Route::Login);
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn send_otp(&self, phone: &str) -> Result<Envelope<serde_json::Value>> {
        let body = json!({ "phone": phone });
        self.client.post(SEND_OTP, &body, &RequestOptions::logged()).await
    }

    async fn verify_otp(&self, phone: &str, otp: &str) -> Result<Envelope<VerifyData>> {
        let body = json!({ "phone": phone, "otp": otp });
        self.client.post(VERIFY_OTP, &body, &RequestOptions::logged()).await
    }
}
