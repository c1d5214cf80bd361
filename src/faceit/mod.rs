pub(crate) mod competitions;
pub(crate) mod history;
pub(crate) mod players;
pub(crate) mod season;
pub(crate) mod teams;
#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::error::{FaceitError, Result};

/// Base URL of the FACEIT open data API.
pub const FACEIT_API_BASE: &str = "https://open.faceit.com/data/v4";

/// Organizer id of ESEA league play.
pub const ESEA_ORGANIZER_ID: &str = "08b06cfc-74d0-454b-9a51-feda4b6b18da";

/// Largest page size the history endpoint accepts.
pub(crate) const HISTORY_PAGE_LIMIT: usize = 100;

// A 429 is retried at most this many attempts in total.
const MAX_FETCH_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_millis(1000);

/// An upstream answer before status classification.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    /// Parsed `Retry-After` header value in seconds, when present.
    pub retry_after: Option<u64>,
    pub body: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP capability the client is built on.
///
/// Every operation goes through this seam, so tests substitute a scripted
/// stub for the real [`HttpTransport`]. `sleep` exists on the trait so retry
/// backoff timing is observable in tests instead of waited out.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Issue an authenticated GET for an API-relative endpoint.
    async fn get(&self, endpoint: &str) -> Result<RawResponse>;

    /// Pause between retry attempts.
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Production transport over a [`reqwest::Client`].
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Create a transport against the public FACEIT API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_key)
    }

    /// Create a transport using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, etc.
    pub fn with_client(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http: client,
            base_url: FACEIT_API_BASE.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the transport at a different base URL (e.g. a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Transport for HttpTransport {
    async fn get(&self, endpoint: &str) -> Result<RawResponse> {
        let url = format!("{}{endpoint}", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FaceitError::Http {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());
        let body = response
            .text()
            .await
            .map_err(|source| FaceitError::ResponseBody {
                endpoint: endpoint.to_string(),
                source,
            })?;

        Ok(RawResponse {
            status,
            retry_after,
            body,
        })
    }
}

/// Fetch an endpoint and decode its JSON body into `T`.
///
/// On 429 the call sleeps for the upstream `Retry-After` when given,
/// otherwise backs off exponentially from one second, and tries again up to
/// three attempts in total. Any other non-2xx status fails immediately with
/// the upstream body attached verbatim.
#[instrument(skip(transport))]
pub(crate) async fn fetch_json<T, Tr>(transport: &Tr, endpoint: &str) -> Result<T>
where
    T: DeserializeOwned,
    Tr: Transport,
{
    let mut attempt = 1u32;
    loop {
        let response = transport.get(endpoint).await?;

        if response.status == 429 {
            if attempt >= MAX_FETCH_ATTEMPTS {
                return Err(FaceitError::RateLimited {
                    attempts: attempt,
                    body: response.body,
                });
            }
            let delay = match response.retry_after {
                Some(seconds) => Duration::from_secs(seconds),
                None => BACKOFF_BASE * 2u32.pow(attempt - 1),
            };
            debug!(
                endpoint,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "rate limited, backing off"
            );
            transport.sleep(delay).await;
            attempt += 1;
            continue;
        }

        if !response.is_success() {
            return Err(FaceitError::Status {
                status: response.status,
                body: response.body,
            });
        }

        return serde_json::from_str(&response.body).map_err(|source| FaceitError::Decode {
            endpoint: endpoint.to_string(),
            source,
        });
    }
}
