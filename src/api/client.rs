use reqwest::{Client, Method, RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::response::{server_message, ApiFailure, Envelope, StatusFallback};
use crate::app::ApiConfig;
use crate::utils::DomuError;

/// HTTP client for the DOMU backend
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    cancel: Option<CancellationToken>,
}

impl ApiClient {
    /// Create a client for `base_url` with no request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self, DomuError> {
        Self::build(base_url.into(), None)
    }

    /// Create a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, DomuError> {
        Self::build(
            config.base_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(base_url: String, timeout: Option<Duration>) -> Result<Self, DomuError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_http_client(base_url, builder.build()?))
    }

    /// Wrap an already configured reqwest client
    pub fn with_http_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            cancel: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A copy whose requests fail with `Cancelled` once `token` is cancelled
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            cancel: Some(token),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of one record, with `id` as a single encoded path segment
    pub(crate) fn item_url(&self, collection: &str, id: &str) -> String {
        let base = self.url(collection);
        match Url::parse(&base) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push(id);
                }
                url.into()
            }
            // An unparseable base URL fails at send time as a transport error
            Err(_) => format!("{}/{}", base, id),
        }
    }

    /// Request addressed to one record of `collection`
    pub(crate) fn item(&self, method: Method, collection: &str, id: &str) -> RequestBuilder {
        self.client.request(method, self.item_url(collection, id))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.client.put(self.url(path))
    }

    /// Send one request and normalize the outcome
    ///
    /// Never retries. Transport errors, rejected statuses and unparseable
    /// bodies all come back as an [`ApiFailure`].
    pub(crate) async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        fallback: StatusFallback,
    ) -> Result<Envelope, ApiFailure> {
        let exchange = async {
            let response = request.send().await.map_err(|e| {
                tracing::error!(operation, error = %e, "API request failed");
                ApiFailure::transport()
            })?;

            let status = response.status();
            let bytes = response.bytes().await.map_err(|e| {
                tracing::error!(operation, error = %e, "failed to read API response body");
                ApiFailure::transport()
            })?;

            Ok::<_, ApiFailure>((status, bytes))
        };

        let (status, bytes) = match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::debug!(operation, "API request cancelled");
                    return Err(ApiFailure::cancelled());
                }
                result = exchange => result?,
            },
            None => exchange.await?,
        };

        // Empty bodies (e.g. 204 on DELETE) read as null
        let body = if bytes.is_empty() {
            Ok(Value::Null)
        } else {
            serde_json::from_slice::<Value>(&bytes)
        };

        if !status.is_success() {
            let message = body
                .ok()
                .as_ref()
                .and_then(server_message)
                .unwrap_or_else(|| fallback.message(status));
            tracing::warn!(operation, status = status.as_u16(), %message, "API request rejected");
            return Err(ApiFailure::status(status.as_u16(), message));
        }

        let body = body.map_err(|e| {
            tracing::warn!(operation, status = status.as_u16(), error = %e, "API response is not JSON");
            ApiFailure::malformed(crate::constants::MALFORMED_RESPONSE_MESSAGE)
        })?;

        if body.get("success") == Some(&Value::Bool(false)) {
            let message = server_message(&body).unwrap_or_else(|| fallback.message(status));
            tracing::warn!(operation, status = status.as_u16(), %message, "API reported failure");
            return Err(ApiFailure::status(status.as_u16(), message));
        }

        tracing::debug!(operation, status = status.as_u16(), "API request succeeded");
        Ok(Envelope::new(body))
    }
}

/// Attach the bearer token of a protected endpoint
pub(crate) fn authorized(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header("Authorization", format!("Bearer {}", token))
}
