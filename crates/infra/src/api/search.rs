//! Partner search endpoints.

use std::sync::Arc;

use rishta_domain::{ActionError, Envelope, SearchFilters};
use rishta_core::{Notifier, ToastKind};
use serde_json::Value;

use super::client::{ApiClient, RequestOptions};

const ADVANCED: &str = "search";
const FILTER_OPTIONS: &str = "search/filters/options";
const QUICK: &str = "search/quick";

pub struct SearchApi {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl SearchApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Filtered search across profiles.
    ///
    /// # Errors
    /// Rejected on a `success: false` answer, `Failed` on transport or
    /// HTTP-level errors; one notification either way.
    pub async fn advanced(&self, filters: &SearchFilters) -> Result<Vec<Value>, ActionError> {
        let envelope: Envelope<Vec<Value>> = self
            .client
            .post(ADVANCED, filters, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;
        self.unpack(envelope)
    }

    /// The option sets the filter UI is built from.
    ///
    /// # Errors
    /// Same split as [`SearchApi::advanced`].
    pub async fn filter_options(&self) -> Result<Value, ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .get(FILTER_OPTIONS, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            Ok(envelope.data.unwrap_or(Value::Null))
        } else {
            let message = envelope.message_or("Search failed").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    /// Free-text search by name or keyword.
    ///
    /// # Errors
    /// Same split as [`SearchApi::advanced`].
    pub async fn quick(&self, query: &str) -> Result<Vec<Value>, ActionError> {
        let options = RequestOptions::logged().query("q", query);
        let envelope: Envelope<Vec<Value>> =
            self.client.get(QUICK, &options).await.map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;
        self.unpack(envelope)
    }

    fn unpack(&self, envelope: Envelope<Vec<Value>>) -> Result<Vec<Value>, ActionError> {
        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            let message = envelope.message_or("Search failed").to_owned();
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
    use wiremock::matchers::{body_json, method, path, query_param};
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

    fn api(server: &MockServer) -> (SearchApi, Arc<RecordingNotifier>) {
        let config = ApiClientConfig { base_url: server.uri(), ..ApiClientConfig::default() };
        let client = Arc::new(ApiClient::new(config, Arc::new(NoTokens)).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());
        (SearchApi::new(client, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn advanced_posts_only_the_set_filters() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/search"))
            .and(body_json(json!({ "ageMin": 25, "ageMax": 35, "page": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "id": "u1" }]
            })))
            .mount(&server)
            .await;

        let (api, _) = api(&server);
        let filters = SearchFilters {
            age_min: Some(25),
            age_max: Some(35),
            page: Some(1),
            ..SearchFilters::default()
        };
        let results = api.advanced(&filters).await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn quick_search_sends_the_query_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/search/quick"))
            .and(query_param("q", "priya"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [{ "id": "u1" }, { "id": "u2" }]
            })))
            .mount(&server)
            .await;

        let (api, _) = api(&server);
        let results = api.quick("priya").await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn filter_options_failure_notifies_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/search/filters/options"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (api, notifier) = api(&server);
        let err = api.filter_options().await.err();
        assert!(matches!(err, Some(ActionError::Failed(_))));
        assert_eq!(notifier.toasts.lock().len(), 1);
    }
}
