//! Profile read/write endpoints.

use std::sync::Arc;

use rishta_domain::{ActionError, Envelope};
use rishta_core::{Navigator, Notifier, ToastKind};
use serde::Deserialize;
use serde_json::Value;

use super::client::{ApiClient, RequestOptions};

const MY_PROFILE: &str = "profile/me";
const USER_PROFILE: &str = "profile/";
const CREATE_UPDATE: &str = "profile/create";
const UPDATE_FAMILY: &str = "profile/family";

/// The `profile/me` payload: the profile document plus its photo
/// list, delivered side by side.
#[derive(Debug, Clone, Deserialize)]
pub struct MyProfileData {
    #[serde(default)]
    pub profile: Value,
    #[serde(default)]
    pub photos: Vec<Value>,
}

pub struct ProfileApi {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ProfileApi {
    #[must_use]
    pub fn new(
        client: Arc<ApiClient>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { client, notifier, navigator }
    }

    /// Fetch the caller's own profile and photos.
    ///
    /// # Errors
    /// Rejected on a `success: false` answer, `Failed` on transport or
    /// HTTP-level errors; one notification either way.
    pub async fn my_profile(&self) -> Result<MyProfileData, ActionError> {
        let envelope: Envelope<MyProfileData> = self
            .client
            .get(MY_PROFILE, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        let message = envelope.message_or("Failed to load profile").to_owned();
        match (envelope.success, envelope.data) {
            (true, Some(data)) => Ok(data),
            _ => {
                self.notifier.notify(ToastKind::Error, &message);
                Err(ActionError::Rejected(message))
            }
        }
    }

    /// Fetch another member's profile by id.
    ///
    /// # Errors
    /// Same split as [`ProfileApi::my_profile`].
    pub async fn user_profile(&self, user_id: &str) -> Result<Value, ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .get(&format!("{USER_PROFILE}{user_id}"), &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        let message = envelope.message_or("Failed to load profile").to_owned();
        match (envelope.success, envelope.data) {
            (true, Some(data)) => Ok(data),
            _ => {
                self.notifier.notify(ToastKind::Error, &message);
                Err(ActionError::Rejected(message))
            }
        }
    }

    /// Create or update the caller's profile. On success the edit
    /// screen is popped and the backend message surfaced.
    ///
    /// # Errors
    /// Same split as [`ProfileApi::my_profile`].
    pub async fn create_or_update(&self, profile: &Value) -> Result<(), ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .post(CREATE_UPDATE, profile, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            self.navigator.go_back();
            self.notifier.notify(ToastKind::Success, envelope.message_or("Profile saved"));
            Ok(())
        } else {
            let message = envelope.message_or("Failed to update profile").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    /// Update the family-details section of the profile.
    ///
    /// # Errors
    /// Same split as [`ProfileApi::my_profile`].
    pub async fn update_family(&self, details: &Value) -> Result<(), ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .put(UPDATE_FAMILY, details, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            self.notifier
                .notify(ToastKind::Success, envelope.message_or("Family details updated"));
            Ok(())
        } else {
            let message = envelope.message_or("Failed to update family details").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rishta_core::{AccessTokenProvider, Route};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::client::ApiClientConfig;

    struct NoTokens;

    #[async_trait::async_trait]
    impl AccessTokenProvider for NoTokens {
        async fn access_token(&self) -> Option<String> {
            None
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        toasts: Mutex<Vec<(ToastKind, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, kind: ToastKind, message: &str) {
            self.toasts.lock().push((kind, message.to_owned()));
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        backs: Mutex<usize>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, _route: Route) {}

        fn reset(&self, _route: Route) {}

        fn go_back(&self) {
            *self.backs.lock() += 1;
        }
    }

    fn api(server: &MockServer) -> (ProfileApi, Arc<RecordingNotifier>, Arc<RecordingNavigator>) {
        let config = ApiClientConfig { base_url: server.uri(), ..ApiClientConfig::default() };
        let client = Arc::new(ApiClient::new(config, Arc::new(NoTokens)).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        (ProfileApi::new(client, notifier.clone(), navigator.clone()), notifier, navigator)
    }

    #[tokio::test]
    async fn my_profile_returns_profile_and_photos() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/profile/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "profile": { "fullName": "A B" },
                    "photos": [{ "id": "p1" }, { "id": "p2" }]
                }
            })))
            .mount(&server)
            .await;

        let (api, notifier, _) = api(&server);
        let data = api.my_profile().await.unwrap();
        assert_eq!(data.photos.len(), 2);
        assert_eq!(data.profile["fullName"], "A B");
        assert!(notifier.toasts.lock().is_empty());
    }

    #[tokio::test]
    async fn create_or_update_pops_the_screen_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/profile/create"))
            .and(body_json(json!({ "city": "Surat" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Profile updated"
            })))
            .mount(&server)
            .await;

        let (api, notifier, navigator) = api(&server);
        api.create_or_update(&json!({ "city": "Surat" })).await.unwrap();

        assert_eq!(*navigator.backs.lock(), 1);
        assert_eq!(
            notifier.toasts.lock().clone(),
            vec![(ToastKind::Success, "Profile updated".to_owned())]
        );
    }

    #[tokio::test]
    async fn rejected_update_stays_on_screen_with_one_toast() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/profile/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "City is required"
            })))
            .mount(&server)
            .await;

        let (api, notifier, navigator) = api(&server);
        let err = api.create_or_update(&json!({})).await.err();

        assert!(matches!(err, Some(ActionError::Rejected(ref m)) if m == "City is required"));
        assert_eq!(*navigator.backs.lock(), 0);
        assert_eq!(notifier.toasts.lock().len(), 1);
    }

    #[tokio::test]
    async fn family_update_uses_put_and_surfaces_the_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/profile/family"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Family details updated"
            })))
            .mount(&server)
            .await;

        let (api, notifier, _) = api(&server);
        api.update_family(&json!({ "fatherName": "C D" })).await.unwrap();
        assert_eq!(
            notifier.toasts.lock().clone(),
            vec![(ToastKind::Success, "Family details updated".to_owned())]
        );
    }

    #[tokio::test]
    async fn transport_failure_notifies_once_and_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/profile/u42"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (api, notifier, _) = api(&server);
        let err = api.user_profile("u42").await.err();
        assert!(matches!(err, Some(ActionError::Failed(_))));
        assert_eq!(notifier.toasts.lock().len(), 1);
    }
}
