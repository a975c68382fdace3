//! Shared HTTP foundation for the registry adapters
//!
//! One reqwest client serves both registries. Transport failures and 429
//! responses are retried with exponential backoff; a 404 is a definitive
//! answer and returns immediately.

use crate::error::RegistryError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent sent with every registry request
const USER_AGENT: &str = concat!("stale-deps/", env!("CARGO_PKG_VERSION"));

/// Retry attempts after the initial request
const MAX_RETRIES: u32 = 3;

/// First backoff delay, doubled per retry
const BASE_DELAY: Duration = Duration::from_millis(100);

/// HTTP client wrapper with retry logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_retries: u32,
}

impl HttpClient {
    /// Create a client with the default timeout and User-Agent
    pub fn new() -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RegistryError::ClientInit {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_retries: MAX_RETRIES,
        })
    }

    /// Override the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// GET a URL and deserialize the JSON body.
    ///
    /// `package` and `registry` only provide error context.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &'static str,
    ) -> Result<T, RegistryError> {
        let response = self.get_with_retry(url, package, registry).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| RegistryError::MalformedResponse {
                package: package.to_string(),
                registry,
                message: e.to_string(),
            })
    }

    async fn get_with_retry(
        &self,
        url: &str,
        package: &str,
        registry: &'static str,
    ) -> Result<reqwest::Response, RegistryError> {
        let mut delay = BASE_DELAY;

        for attempt in 0..=self.max_retries {
            let retries_left = attempt < self.max_retries;

            let error = match self.client.get(url).send().await {
                Ok(response) => match response.status() {
                    StatusCode::TOO_MANY_REQUESTS => RegistryError::RateLimited {
                        package: package.to_string(),
                        registry,
                    },
                    StatusCode::NOT_FOUND => {
                        return Err(RegistryError::PackageNotFound {
                            package: package.to_string(),
                            registry,
                        });
                    }
                    status if !status.is_success() => {
                        return Err(RegistryError::Status {
                            package: package.to_string(),
                            registry,
                            status: status.as_u16(),
                        });
                    }
                    _ => return Ok(response),
                },
                Err(e) if e.is_timeout() => RegistryError::TimedOut {
                    package: package.to_string(),
                    registry,
                },
                Err(e) => RegistryError::Transport {
                    package: package.to_string(),
                    registry,
                    message: e.to_string(),
                },
            };

            if !retries_left {
                return Err(error);
            }
            tokio::time::sleep(delay).await;
            delay *= 2;
        }

        unreachable!("retry loop always returns")
    }
}
