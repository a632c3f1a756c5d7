use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: Url },
    #[error("request to {url} failed: {message}")]
    Transport { url: Url, message: String },
    #[error("request to {url} returned HTTP {status}")]
    Status { url: Url, status: u16 },
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .context("build catalog http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| transport_error(url, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|err| transport_error(url, &err))
    }
}

fn transport_error(url: &Url, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout { url: url.clone() }
    } else {
        FetchError::Transport {
            url: url.clone(),
            message: err.to_string(),
        }
    }
}
