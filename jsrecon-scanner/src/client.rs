use crate::error::{Result, ScanError};
use reqwest::Client;
use reqwest::header::HeaderMap;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Status and decoded body of a completed GET.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status_code: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// HTTP client sending the same static headers on every request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(headers: HeaderMap) -> Result<Self> {
        Self::with_timeout(headers, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(headers: HeaderMap, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` and read the whole body as text, whatever the status.
    pub async fn get(&self, url: &str) -> Result<FetchedPage> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        Ok(FetchedPage {
            url: url.to_string(),
            status_code,
            body,
        })
    }

    /// GET `url`, treating anything but HTTP 200 as an error.
    pub async fn get_ok(&self, url: &str) -> Result<FetchedPage> {
        let page = self.get(url).await?;
        if page.is_ok() {
            Ok(page)
        } else {
            Err(ScanError::Status(page.status_code))
        }
    }
}
