//! `ApiClient` implementation.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::api::ApiError;
use crate::config::ClientConfig;
use crate::models::MessageResponse;
use crate::tokens::{TokenStore, keys};

/// Longest slice of a response body copied into log events.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the storefront REST API.
///
/// Issues exactly one HTTP request per call and decodes the JSON body.
/// Resource-specific calls live on the service views returned by
/// [`ApiClient::products`], [`ApiClient::cart`] and friends.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
                tokens,
            }),
        })
    }

    /// Backend origin requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Token storage consulted for the bearer token.
    #[must_use]
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        send(request).await
    }

    pub(crate) async fn get_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path)?.query(query);
        send(request).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        send(request).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        send(request).await
    }

    /// `PUT` without a request body (state transitions like cancel).
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::PUT, path)?;
        send(request).await
    }

    /// `DELETE`, accepting either a `{"message": ...}` body or `204 No Content`.
    pub(crate) async fn delete(&self, path: &str) -> Result<MessageResponse, ApiError> {
        let request = self.request(Method::DELETE, path)?;
        let (status, body) = send_raw(request).await?;

        if body.trim().is_empty() {
            return Ok(MessageResponse {
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        decode(&body)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Build a request for `path`, attaching the bearer token if one is stored.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.inner.base_url.join(path)?;
        debug!(method = %method, url = %url, "API request");

        let mut request = self.inner.client.request(method, url);
        if let Some(token) = self.inner.tokens.get(keys::ACCESS_TOKEN) {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let (_, body) = send_raw(request).await?;
    decode(&body)
}

/// Send the request and return the status and body of a success response.
async fn send_raw(request: RequestBuilder) -> Result<(StatusCode, String), ApiError> {
    let response = request.send().await?;
    let status = response.status();

    // Get response body as text first for better error diagnostics
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %truncate(&body),
            "Storefront API returned non-success status"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok((status, body))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %truncate(body),
            "Failed to parse storefront API response"
        );
        ApiError::Decode(e)
    })
}

fn truncate(body: &str) -> String {
    body.chars().take(LOG_BODY_LIMIT).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::tokens::MemoryTokenStore;

    fn client_for(server: &MockServer, tokens: Arc<dyn TokenStore>) -> ApiClient {
        let config = ClientConfig::with_api_url(&server.uri()).unwrap();
        ApiClient::new(&config, tokens).unwrap()
    }

    #[tokio::test]
    async fn test_attaches_bearer_token_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/profile"))
            .and(header("authorization", "Bearer access-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = Arc::new(MemoryTokenStore::new());
        tokens.set(keys::ACCESS_TOKEN, "access-123").unwrap();
        let api = client_for(&server, tokens);

        let body: serde_json::Value = api.get("/api/users/profile").await.unwrap();
        assert_eq!(body, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_omits_authorization_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let api = client_for(&server, Arc::new(MemoryTokenStore::new()));
        let _: Vec<serde_json::Value> = api.get("/api/tags").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_query_parameters_are_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/orders"))
            .and(query_param("status", "pending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server, Arc::new(MemoryTokenStore::new()));
        let _: Vec<serde_json::Value> = api
            .get_with_query("/api/orders", &[("status", "pending")])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})),
            )
            .mount(&server)
            .await;

        let api = client_for(&server, Arc::new(MemoryTokenStore::new()));
        let err = api
            .get::<serde_json::Value>("/api/products/99")
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("Not found."));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let api = client_for(&server, Arc::new(MemoryTokenStore::new()));
        let err = api.get::<Vec<String>>("/api/tags").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/reviews/4"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let api = client_for(&server, Arc::new(MemoryTokenStore::new()));
        let response = api.delete("/api/reviews/4").await.unwrap();
        assert_eq!(response.message, "No Content");
    }
}
