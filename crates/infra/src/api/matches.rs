//! Match discovery and shortlist endpoints.

use std::sync::Arc;

use rishta_domain::{ActionError, Envelope};
use rishta_core::{Notifier, ToastKind};
use serde_json::Value;

use super::client::{ApiClient, RequestOptions};

const SUGGESTIONS: &str = "matches/suggestions";
const NEARBY: &str = "matches/nearby";
const SHORTLISTED: &str = "matches/shortlisted";
const BY_ID: &str = "matches/";

pub struct MatchesApi {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl MatchesApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Paged match suggestions.
    ///
    /// # Errors
    /// Rejected on a `success: false` answer, `Failed` on transport or
    /// HTTP-level errors; one notification either way.
    pub async fn suggestions(&self, page: u32, limit: u32) -> Result<Vec<Value>, ActionError> {
        let options = RequestOptions::logged()
            .query("page", page.to_string())
            .query("limit", limit.to_string());
        self.listing(SUGGESTIONS, &options).await
    }

    /// Members near the caller.
    ///
    /// # Errors
    /// Same split as [`MatchesApi::suggestions`].
    pub async fn nearby(&self) -> Result<Vec<Value>, ActionError> {
        self.listing(NEARBY, &RequestOptions::logged()).await
    }

    /// Profiles the caller has shortlisted.
    ///
    /// # Errors
    /// Same split as [`MatchesApi::suggestions`].
    pub async fn shortlisted(&self) -> Result<Vec<Value>, ActionError> {
        self.listing(SHORTLISTED, &RequestOptions::logged()).await
    }

    /// Add a member to the shortlist.
    ///
    /// # Errors
    /// Same split as [`MatchesApi::suggestions`].
    pub async fn shortlist(&self, user_id: &str) -> Result<(), ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .post(
                &format!("{BY_ID}{user_id}/shortlist"),
                &serde_json::json!({}),
                &RequestOptions::logged(),
            )
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;
        self.finish(envelope, "Profile shortlisted", "Failed to shortlist profile")
    }

    /// Remove a member from the shortlist.
    ///
    /// # Errors
    /// Same split as [`MatchesApi::suggestions`].
    pub async fn remove_shortlist(&self, user_id: &str) -> Result<(), ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .delete(&format!("{BY_ID}{user_id}/shortlist"), &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;
        self.finish(envelope, "Removed from shortlist", "Failed to remove from shortlist")
    }

    fn finish(
        &self,
        envelope: Envelope<Value>,
        ok_fallback: &str,
        err_fallback: &str,
    ) -> Result<(), ActionError> {
        if envelope.success {
            self.notifier.notify(ToastKind::Success, envelope.message_or(ok_fallback));
            Ok(())
        } else {
            let message = envelope.message_or(err_fallback).to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    async fn listing(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Vec<Value>, ActionError> {
        let envelope: Envelope<Vec<Value>> =
            self.client.get(path, options).await.map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            let message = envelope.message_or("Failed to load matches").to_owned();
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
    use wiremock::matchers::{method, path, query_param};
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

    fn api(server: &MockServer) -> (MatchesApi, Arc<RecordingNotifier>) {
        let config = ApiClientConfig { base_url: server.uri(), ..ApiClientConfig::default() };
        let client = Arc::new(ApiClient::new(config, Arc::new(NoTokens)).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());
        (MatchesApi::new(client, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn suggestions_carry_page_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/matches/suggestions"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "id": "u1" }, { "id": "u2" }]
            })))
            .mount(&server)
            .await;

        let (api, _) = api(&server);
        let matches = api.suggestions(2, 10).await.unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[tokio::test]
    async fn shortlist_toggles_through_post_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/matches/u5/shortlist"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/matches/u5/shortlist"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true })),
            )
            .mount(&server)
            .await;

        let (api, notifier) = api(&server);
        api.shortlist("u5").await.unwrap();
        api.remove_shortlist("u5").await.unwrap();
        assert_eq!(
            notifier.toasts.lock().clone(),
            vec![
                (ToastKind::Success, "Profile shortlisted".to_owned()),
                (ToastKind::Success, "Removed from shortlist".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn nearby_failure_notifies_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/matches/nearby"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (api, notifier) = api(&server);
        let err = api.nearby().await.err();
        assert!(matches!(err, Some(ActionError::Failed(_))));
        assert_eq!(notifier.toasts.lock().len(), 1);
    }
}
