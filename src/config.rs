use std::time::Duration;

use anyhow::Context as _;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://www.yes24.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const SEARCH_PATH: &str = "/Product/Search";
const SEARCH_DOMAIN: (&str, &str) = ("domain", "BOOK");
const SEARCH_QUERY_PARAM: &str = "query";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl SiteConfig {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("parse base url: {base_url}"))?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            anyhow::bail!("base url must be http/https: {base_url}");
        }
        Ok(Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn retailer() -> anyhow::Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The query is percent-encoded here.
    pub fn search_url(&self, query: &str) -> anyhow::Result<Url> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .with_context(|| format!("join search path: {SEARCH_PATH}"))?;
        let (domain_key, domain) = SEARCH_DOMAIN;
        url.query_pairs_mut()
            .append_pair(domain_key, domain)
            .append_pair(SEARCH_QUERY_PARAM, query);
        Ok(url)
    }

    pub fn catalog_url(&self, href: &str) -> anyhow::Result<Url> {
        self.base_url
            .join(href.trim())
            .with_context(|| format!("resolve catalog url: {href}"))
    }
}
