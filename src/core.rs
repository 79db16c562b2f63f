use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use super::config::LoaderConfig;
use super::error::{LoaderError, Result};
use super::traits::Fetcher;

/// HTTP implementation of [`Fetcher`] used against SEC.gov.
///
/// Every request carries the configured user agent (SEC.gov rejects anonymous
/// automated traffic) and is bounded by the configured timeout, both for
/// establishing the connection and for the request as a whole. The timeout is
/// owned by this client rather than set process-wide, so several fetchers with
/// different budgets can coexist.
///
/// A single call is a single attempt. The outcome is classified as:
///
/// * `LoaderError::HttpStatus` - the server answered with a non-2xx status
/// * `LoaderError::Timeout` - connecting or reading exceeded the timeout
/// * `LoaderError::Network` - any other transport failure
///
/// # Examples
///
/// ```rust
/// # use xbrlrss_loader::{HttpFetcher, LoaderConfig};
/// let fetcher = HttpFetcher::new(&LoaderConfig::default())?;
/// # Ok::<(), xbrlrss_loader::LoaderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds the underlying HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::ConfigError` if the user agent is not a valid header
    /// value or the HTTP client cannot be constructed.
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| LoaderError::ConfigError(format!("Invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|e| LoaderError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::HttpStatus {
                code: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Reading the body can still time out or drop mid-stream; both surface here.
        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
