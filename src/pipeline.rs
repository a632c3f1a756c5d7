use std::sync::Arc;

use crate::assemble::{assemble, created_now};
use crate::config::SiteConfig;
use crate::extract::{FieldReader, extract_fields};
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::formats::BookRecord;
use crate::locate::PageLocator;
use crate::normalize::normalized_title;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("no catalog page found for {query:?}")]
    LocatorNotFound { query: String },
    #[error("could not read book info from {url}")]
    ExtractionError { url: String },
}

pub type PipelineResult = Result<BookRecord, PipelineError>;

/// Query → catalog page → fields → record, one attempt, no retries.
pub struct Pipeline {
    fetcher: Arc<dyn PageFetcher>,
    site: SiteConfig,
    locator: PageLocator,
    reader: FieldReader,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn PageFetcher>, site: SiteConfig) -> anyhow::Result<Self> {
        Ok(Self {
            fetcher,
            site,
            locator: PageLocator::catalog()?,
            reader: FieldReader::catalog()?,
        })
    }

    pub fn http(site: SiteConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(site.timeout)?;
        Self::new(Arc::new(fetcher), site)
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub async fn run(&self, query: &str) -> PipelineResult {
        let not_found = || PipelineError::LocatorNotFound {
            query: query.to_owned(),
        };

        let href = match self
            .locator
            .locate(self.fetcher.as_ref(), &self.site, query)
            .await
        {
            Ok(Some(href)) => href,
            Ok(None) => {
                tracing::warn!(query, "search returned no results");
                return Err(not_found());
            }
            Err(err) => {
                tracing::warn!(query, "search failed: {err:#}");
                return Err(not_found());
            }
        };
        tracing::debug!(query, %href, "located catalog page");

        let extraction_error = || PipelineError::ExtractionError { url: href.clone() };

        let url = self.site.catalog_url(&href).map_err(|err| {
            tracing::warn!(%href, "resolve catalog url failed: {err:#}");
            extraction_error()
        })?;

        let body = self.fetcher.fetch(&url).await.map_err(|err| {
            tracing::warn!(%url, "fetch catalog page failed: {err}");
            extraction_error()
        })?;

        let fields = extract_fields(&self.reader, &body).map_err(|err| {
            tracing::warn!(%url, "extract fields failed: {err:#}");
            extraction_error()
        })?;
        tracing::debug!(?fields, "extracted fields");

        let title = normalized_title(&fields.main_title, fields.sub_title.as_deref());
        let record = assemble(&fields, &title, created_now()).map_err(|err| {
            tracing::warn!(%url, "assemble record failed: {err:#}");
            extraction_error()
        })?;
        tracing::info!(title = %record.title, "assembled book record");

        Ok(record)
    }
}
