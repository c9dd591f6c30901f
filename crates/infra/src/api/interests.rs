//! Interest (expression of interest) endpoints.

use std::sync::Arc;

use rishta_domain::{ActionError, Envelope};
use rishta_core::{Notifier, ToastKind};
use serde_json::{json, Value};

use super::client::{ApiClient, RequestOptions};

const SEND: &str = "interests/send";
const SENT: &str = "interests/sent";
const RECEIVED: &str = "interests/received";
const BY_ID: &str = "interests/";

pub struct InterestsApi {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl InterestsApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Express interest in another member, with an optional note.
    ///
    /// # Errors
    /// Rejected on a `success: false` answer, `Failed` on transport or
    /// HTTP-level errors; one notification either way.
    pub async fn send(
        &self,
        to_user_id: &str,
        message: Option<&str>,
    ) -> Result<(), ActionError> {
        let body = json!({ "toUserId": to_user_id, "message": message });
        self.posting(SEND, &body, "Interest sent successfully", "Failed to send interest").await
    }

    /// Interests the caller has sent.
    ///
    /// # Errors
    /// Same split as [`InterestsApi::send`].
    pub async fn sent(&self) -> Result<Vec<Value>, ActionError> {
        self.listing(SENT).await
    }

    /// Interests other members have sent to the caller.
    ///
    /// # Errors
    /// Same split as [`InterestsApi::send`].
    pub async fn received(&self) -> Result<Vec<Value>, ActionError> {
        self.listing(RECEIVED).await
    }

    /// Accept a received interest.
    ///
    /// # Errors
    /// Same split as [`InterestsApi::send`].
    pub async fn accept(&self, interest_id: &str) -> Result<(), ActionError> {
        self.posting(
            &format!("{BY_ID}{interest_id}/accept"),
            &json!({}),
            "Interest accepted",
            "Failed to accept interest",
        )
        .await
    }

    /// Decline a received interest.
    ///
    /// # Errors
    /// Same split as [`InterestsApi::send`].
    pub async fn reject(&self, interest_id: &str) -> Result<(), ActionError> {
        self.posting(
            &format!("{BY_ID}{interest_id}/reject"),
            &json!({}),
            "Interest rejected",
            "Failed to reject interest",
        )
        .await
    }

    async fn posting(
        &self,
        path: &str,
        body: &Value,
        ok_fallback: &str,
        err_fallback: &str,
    ) -> Result<(), ActionError> {
        let envelope: Envelope<Value> =
            self.client.post(path, body, &RequestOptions::logged()).await.map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            self.notifier.notify(ToastKind::Success, envelope.message_or(ok_fallback));
            Ok(())
        } else {
            let message = envelope.message_or(err_fallback).to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    async fn listing(&self, path: &str) -> Result<Vec<Value>, ActionError> {
        let envelope: Envelope<Vec<Value>> =
            self.client.get(path, &RequestOptions::logged()).await.map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            let message = envelope.message_or("Failed to load interests").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use rishta_core::AccessTokenProvider;
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

    fn api(server: &MockServer) -> (InterestsApi, Arc<RecordingNotifier>) {
        let config = ApiClientConfig { base_url: server.uri(), ..ApiClientConfig::default() };
        let client = Arc::new(ApiClient::new(config, Arc::new(NoTokens)).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());
        (InterestsApi::new(client, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn send_posts_recipient_and_note() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/interests/send"))
            .and(body_json(json!({ "toUserId": "u7", "message": "hello" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
            )
            .mount(&server)
            .await;

        let (api, notifier) = api(&server);
        api.send("u7", Some("hello")).await.unwrap();
        assert_eq!(
            notifier.toasts.lock().clone(),
            vec![(ToastKind::Success, "Interest sent successfully".to_owned())]
        );
    }

    #[tokio::test]
    async fn accept_hits_the_id_scoped_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/interests/i3/accept"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Interest accepted"
            })))
            .mount(&server)
            .await;

        let (api, notifier) = api(&server);
        api.accept("i3").await.unwrap();
        assert_eq!(
            notifier.toasts.lock().clone(),
            vec![(ToastKind::Success, "Interest accepted".to_owned())]
        );
    }

    #[tokio::test]
    async fn received_listing_is_silent_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/interests/received"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "id": "i1" }]
            })))
            .mount(&server)
            .await;

        let (api, notifier) = api(&server);
        let interests = api.received().await.unwrap();
        assert_eq!(interests.len(), 1);
        assert!(notifier.toasts.lock().is_empty());
    }

    #[tokio::test]
    async fn duplicate_interest_rejection_surfaces_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/interests/send"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Interest already sent"
            })))
            .mount(&server)
            .await;

        let (api, notifier) = api(&server);
        let err = api.send("u7", None).await.err();
        assert!(matches!(err, Some(ActionError::Rejected(ref m)) if m == "Interest already sent"));
        assert_eq!(
            notifier.toasts.lock().clone(),
            vec![(ToastKind::Error, "Interest already sent".to_owned())]
        );
    }
}
