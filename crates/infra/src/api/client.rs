//! REST client for the duty-log API
//!
//! Thin layer over [`HttpClient`] that builds URLs from the configured base,
//! enforces an overall deadline per call, maps HTTP statuses to [`ApiError`]
//! and decodes JSON bodies.

use std::sync::Arc;
use std::time::Duration;

use logchecker_domain::ApiConfig;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API, e.g. `http://localhost:3001`
    pub base_url: String,
    /// Deadline for one call, retries included
    pub timeout: Duration,
    /// Attempts for idempotent requests
    pub max_attempts: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        ApiClientConfig::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            max_attempts: config.max_attempts as usize,
        }
    }
}

/// API client
pub struct ApiClient {
    http_client: Arc<HttpClient>,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL does not parse or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: ApiClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::Config(format!("Invalid API base URL {}: {e}", config.base_url)))?;

        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .max_attempts(config.max_attempts)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(Self { http_client: Arc::new(http_client), base_url, timeout: config.timeout })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute a GET request and decode the JSON body.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        debug!(url = %url, "GET request");

        let response = self.execute(self.http_client.request(Method::GET, url.clone())).await?;
        Self::decode(response, &url).await
    }

    /// Execute a GET request with query parameters.
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        debug!(url = %url, "GET request");

        let request = self.http_client.request(Method::GET, url.clone()).query(query);
        let response = self.execute(request).await?;
        Self::decode(response, &url).await
    }

    /// Execute a POST request with a JSON body.
    ///
    /// An empty response body decodes as JSON `null`, so `R = Option<_>`
    /// accepts servers that answer with no content.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T, R>(&self, path: &str, body: &T) -> Result<R, ApiError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(url = %url, "POST request");

        let request = self.http_client.request(Method::POST, url.clone()).json(body);
        let response = self.execute(request).await?;
        Self::decode(response, &url).await
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| ApiError::Config(format!("Invalid request URL {joined}: {e}")))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request.header("Accept", "application/json");
        let response = match tokio::time::timeout(self.timeout, self.http_client.send(request)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::from(err)),
            Err(_) => return Err(ApiError::Timeout(self.timeout)),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_status_error(status, &url, body))
    }

    async fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response from {url}: {e}")))?;

        let parsed = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&bytes)
        };

        parsed.map_err(|e| {
            ApiError::Decode(format!("{url} returned status {} with unexpected body: {e}", status.as_u16()))
        })
    }

    fn map_status_error(status: StatusCode, url: &str, body: String) -> ApiError {
        let message = if body.is_empty() {
            format!("{} returned status {}", url, status)
        } else {
            format!("{} returned status {}: {}", url, status, body)
        };

        if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message)
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            ApiError::RateLimit(message)
        } else if status.is_server_error() {
            ApiError::Server(message)
        } else if status.is_client_error() {
            ApiError::Client(message)
        } else {
            ApiError::Network(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        ok: bool,
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(ApiClientConfig {
            base_url: format!("{}/", server.uri()),
            timeout: Duration::from_secs(5),
            max_attempts: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn get_decodes_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let ping: Ping = client_for(&server).get("/api/ping").await.unwrap();

        assert_eq!(ping, Ping { ok: true });
    }

    #[tokio::test]
    async fn get_with_query_encodes_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(query_param("driverId", "4"))
            .and(query_param("startDate", "2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": false})))
            .expect(1)
            .mount(&server)
            .await;

        let ping: Ping = client_for(&server)
            .get_with_query("/api/ping", &[("driverId", "4"), ("startDate", "2024-01-01")])
            .await
            .unwrap();

        assert!(!ping.ok);
    }

    #[tokio::test]
    async fn post_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ping"))
            .and(body_json(serde_json::json!({"hello": "world"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let reply: Option<Ping> = client_for(&server)
            .post("/api/ping", &serde_json::json!({"hello": "world"}))
            .await
            .unwrap();

        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn statuses_map_to_categories() {
        let server = MockServer::start().await;
        Mock::given(path("/missing")).respond_with(ResponseTemplate::new(404)).mount(&server).await;
        Mock::given(path("/broken"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;
        Mock::given(path("/garbled"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;
        let client = client_for(&server);

        let missing = client.get::<Ping>("/missing").await.unwrap_err();
        let broken = client.get::<Ping>("/broken").await.unwrap_err();
        let garbled = client.get::<Ping>("/garbled").await.unwrap_err();

        assert!(matches!(missing, ApiError::NotFound(_)));
        assert!(matches!(broken, ApiError::Server(ref msg) if msg.contains("boom")));
        assert!(matches!(garbled, ApiError::Decode(_)));
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = ApiClient::new(ApiClientConfig {
            base_url: "not a url".into(),
            ..ApiClientConfig::default()
        });

        assert!(matches!(result, Err(ApiError::Config(_))));
    }
}
