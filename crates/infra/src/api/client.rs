//! Session-aware request pipeline.
//!
//! Every outbound call:
//! - resolves the current access token (await completes before dispatch,
//!   so a call is never sent half-authenticated)
//! - is stamped before dispatch and timed on every outcome
//! - has its result classified: `success: false` envelopes resolve so
//!   callers branch on them, transport and HTTP-status failures reject
//! - emits structured diagnostics that are null-safe end to end; logging
//!   can never abort request resolution

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Method, StatusCode};
use rishta_core::AccessTokenProvider;
use rishta_domain::constants::{API_PREFIX, DEFAULT_BASE_URL, SLOW_CALL_THRESHOLD};
use rishta_domain::{Envelope, PhotoFile, Result, RishtaError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::http::HttpClient;

/// Configuration for the API pipeline.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Backend host, without the API prefix (e.g. "https://api.rishta.app").
    pub base_url: String,
    /// Connect/read timeout handed to the transport.
    pub timeout: Duration,
    /// Elapsed time beyond which a warning diagnostic is emitted.
    /// Observability only; the call still resolves normally.
    pub slow_call_threshold: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            slow_call_threshold: SLOW_CALL_THRESHOLD,
        }
    }
}

/// Recognized per-call options. Timing instrumentation is internal and
/// deliberately not part of this struct.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    /// Emit a debug line with the endpoint and payload before dispatch.
    pub log_request: bool,
}

impl RequestOptions {
    #[must_use]
    pub fn logged() -> Self {
        Self { log_request: true, ..Self::default() }
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// Multipart body: scalar fields and file parts side by side.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: Vec<(String, String)>,
    files: Vec<(String, PhotoFile)>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.texts.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: PhotoFile) -> Self {
        self.files.push((name.into(), file));
        self
    }

    /// Diagnostic summary: scalar values verbatim, files by name.
    fn summary(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.texts {
            map.insert(name.clone(), Value::String(value.clone()));
        }
        for (name, file) in &self.files {
            map.insert(name.clone(), Value::String(format!("<file {}>", file.file_name)));
        }
        Value::Object(map)
    }

    fn into_reqwest(self) -> Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.texts {
            form = form.text(name, value);
        }
        for (name, file) in self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|err| {
                    RishtaError::InvalidInput(format!("invalid mime type: {err}"))
                })?;
            form = form.part(name, part);
        }
        Ok(form)
    }
}

enum RequestBody {
    None,
    Json(Value),
    Multipart(MultipartForm),
}

/// The request pipeline. Cheap to clone behind `Arc` per action struct.
pub struct ApiClient {
    http: HttpClient,
    tokens: Arc<dyn AccessTokenProvider>,
    endpoint_root: String,
    slow_call_threshold: Duration,
}

impl ApiClient {
    /// Build the pipeline over a fresh transport.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(config: ApiClientConfig, tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http = HttpClient::builder().timeout(config.timeout).build()?;
        let endpoint_root =
            format!("{}/{}", config.base_url.trim_end_matches('/'), API_PREFIX);

        Ok(Self { http, tokens, endpoint_root, slow_call_threshold: config.slow_call_threshold })
    }

    /// GET an endpoint relative to the API root.
    ///
    /// # Errors
    /// Rejects on transport failures and non-2xx statuses; a 2xx body
    /// with `success: false` resolves so the caller can branch.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Envelope<T>> {
        self.execute(Method::GET, path, RequestBody::None, options).await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    /// Same classification as [`ApiClient::get`].
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<Envelope<T>> {
        let body = serde_json::to_value(body)
            .map_err(|err| RishtaError::Internal(format!("failed to serialize body: {err}")))?;
        self.execute(Method::POST, path, RequestBody::Json(body), options).await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    /// Same classification as [`ApiClient::get`].
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> Result<Envelope<T>> {
        let body = serde_json::to_value(body)
            .map_err(|err| RishtaError::Internal(format!("failed to serialize body: {err}")))?;
        self.execute(Method::PUT, path, RequestBody::Json(body), options).await
    }

    /// DELETE an endpoint.
    ///
    /// # Errors
    /// Same classification as [`ApiClient::get`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Envelope<T>> {
        self.execute(Method::DELETE, path, RequestBody::None, options).await
    }

    /// POST a multipart form (file uploads plus scalar fields).
    ///
    /// # Errors
    /// Same classification as [`ApiClient::get`].
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
        options: &RequestOptions,
    ) -> Result<Envelope<T>> {
        self.execute(Method::POST, path, RequestBody::Multipart(form), options).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        options: &RequestOptions,
    ) -> Result<Envelope<T>> {
        let url = format!("{}{}", self.endpoint_root, path);

        // Token resolution completes before dispatch; no call goes out
        // half-authenticated.
        let token = self.tokens.access_token().await;

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(token) = &token {
            builder = builder.bearer_auth(token);
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }

        let payload = match &body {
            RequestBody::None => None,
            RequestBody::Json(value) => Some(value.clone()),
            RequestBody::Multipart(form) => Some(form.summary()),
        };
        builder = match body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form.into_reqwest()?),
        };

        if options.log_request {
            debug!(endpoint = %path, method = %method, payload = ?payload, "dispatching request");
        }

        // Stamped before the network call so elapsed time is measurable
        // regardless of outcome.
        let started_at = Instant::now();

        let response = match self.http.send(builder).await {
            Ok(response) => response,
            Err(err) => {
                self.warn_if_slow(path, started_at);
                error!(
                    endpoint = %path,
                    method = %method,
                    payload = %payload_text(payload.as_ref()),
                    error = %err,
                    "request failed without a response"
                );
                return Err(err);
            }
        };

        self.warn_if_slow(path, started_at);

        let status = response.status();
        let body_value = read_body(response).await;

        if !status.is_success() {
            error!(
                endpoint = %path,
                status = status.as_u16(),
                method = %method,
                payload = %payload_text(payload.as_ref()),
                response = %payload_text(Some(&body_value)),
                "request answered with error status"
            );
            return Err(classify_status(status, &url, &body_value));
        }

        if body_value.get("success").and_then(Value::as_bool) == Some(false) {
            // Resolved, not rejected: the caller branches on the envelope.
            error!(
                endpoint = %path,
                status = status.as_u16(),
                method = %method,
                payload = %payload_text(payload.as_ref()),
                response = %payload_text(Some(&body_value)),
                "request answered with unsuccessful envelope"
            );
        }

        serde_json::from_value(body_value)
            .map_err(|err| RishtaError::Internal(format!("failed to parse response: {err}")))
    }

    fn warn_if_slow(&self, path: &str, started_at: Instant) {
        let elapsed = started_at.elapsed();
        if elapsed > self.slow_call_threshold {
            warn!(endpoint = %path, seconds = elapsed.as_secs_f64(), "slow API call");
        }
    }
}

/// Best-effort body parse; an unreadable or non-JSON body degrades to
/// `null` so the diagnostics path stays infallible.
async fn read_body(response: reqwest::Response) -> Value {
    match response.text().await {
        Ok(text) => serde_json::from_str(&text).unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}

fn payload_text(value: Option<&Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

fn classify_status(status: StatusCode, url: &str, body: &Value) -> RishtaError {
    let detail = body
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| format!("{url} returned status {status}"), ToString::to_string);

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        RishtaError::Auth(detail)
    } else if status.is_server_error() {
        RishtaError::Server(detail)
    } else if status.is_client_error() {
        RishtaError::Api(detail)
    } else {
        RishtaError::Network(detail)
    }
}
