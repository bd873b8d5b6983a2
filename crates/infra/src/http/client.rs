use std::time::Duration;

use logchecker_domain::LogCheckerError;
use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::errors::InfraError;

/// When and how long to wait before re-sending a request.
///
/// Only idempotent methods get more than one attempt: a timeline submission
/// is a POST and reaches the server at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, base_backoff: Duration::from_millis(200) }
    }
}

impl RetryPolicy {
    pub fn attempts_for(&self, method: &Method) -> usize {
        if method.is_idempotent() {
            self.max_attempts.max(1)
        } else {
            1
        }
    }

    /// Delay before retry number `retry` (1-based), doubling each time and
    /// capped at 256x the base.
    pub fn delay(&self, retry: usize) -> Duration {
        let exponent = retry.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << exponent)
    }
}

/// Whether an exchange is worth repeating.
fn is_retryable(outcome: &Result<Response, reqwest::Error>) -> bool {
    match outcome {
        Ok(response) => response.status().is_server_error(),
        Err(err) => err.is_timeout() || err.is_connect() || err.is_request(),
    }
}

/// reqwest client plus a [`RetryPolicy`].
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    policy: RetryPolicy,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send `builder`, repeating idempotent requests on 5xx and transport
    /// failures. The final response is returned whatever its status; status
    /// interpretation belongs to the caller.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, LogCheckerError> {
        let request = builder.build().map_err(|err| LogCheckerError::from(InfraError::from(err)))?;
        let attempts = self.policy.attempts_for(request.method());

        let mut attempt = 1;
        loop {
            let outcome = self.execute_once(&request, attempt).await?;
            if attempt >= attempts || !is_retryable(&outcome) {
                return outcome.map_err(|err| InfraError::from(err).into());
            }

            let delay = self.policy.delay(attempt);
            warn!(
                attempt,
                method = %request.method(),
                url = %request.url(),
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }

    async fn execute_once(
        &self,
        request: &Request,
        attempt: usize,
    ) -> Result<Result<Response, reqwest::Error>, LogCheckerError> {
        let copy = request.try_clone().ok_or_else(|| {
            LogCheckerError::Internal(format!("cannot replay streaming body for {}", request.url()))
        })?;

        let outcome = self.client.execute(copy).await;
        match &outcome {
            Ok(response) => {
                debug!(attempt, url = %request.url(), status = %response.status(), "http response");
            }
            Err(err) => debug!(attempt, url = %request.url(), error = %err, "http transport error"),
        }
        Ok(outcome)
    }
}

#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    policy: RetryPolicy,
    user_agent: String,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            policy: RetryPolicy::default(),
            user_agent: concat!("logchecker/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attempts for idempotent requests, first try included. Zero is read as
    /// one.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.policy.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.policy.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn build(self) -> Result<HttpClient, LogCheckerError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|err| LogCheckerError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, policy: self.policy })
    }
}
