use anyhow::Context as _;
use scraper::{Html, Selector};

use crate::config::SiteConfig;
use crate::extract::parse_selector;
use crate::fetch::PageFetcher;

/// Result-list link selectors, most specific first.
pub const SEARCH_RESULT_LINKS: &[&str] = &[
    "#yesSchList > li > div > div.item_info > div.info_row.info_name > a.gd_name",
    "#yesSchList a.gd_name",
];

#[derive(Debug)]
pub struct PageLocator {
    result_links: Vec<Selector>,
}

impl PageLocator {
    pub fn new(result_links: &[&str]) -> anyhow::Result<Self> {
        let result_links = result_links
            .iter()
            .map(|css| parse_selector(css))
            .collect::<anyhow::Result<Vec<_>>>()
            .context("compile search result selectors")?;
        Ok(Self { result_links })
    }

    pub fn catalog() -> anyhow::Result<Self> {
        Self::new(SEARCH_RESULT_LINKS)
    }

    pub async fn locate(
        &self,
        fetcher: &dyn PageFetcher,
        site: &SiteConfig,
        query: &str,
    ) -> anyhow::Result<Option<String>> {
        let search_url = site.search_url(query).context("build search url")?;
        let body = fetcher
            .fetch(&search_url)
            .await
            .with_context(|| format!("search for {query:?}"))?;
        Ok(self.first_result_href(&body))
    }

    pub fn first_result_href(&self, body: &str) -> Option<String> {
        let html = Html::parse_document(body);
        self.result_links.iter().find_map(|selector| {
            html.select(selector)
                .next()
                .and_then(|el| el.value().attr("href"))
                .map(str::trim)
                .filter(|href| !href.is_empty())
                .map(str::to_owned)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_page(items: &str) -> String {
        format!(
            r#"<!doctype html><html><body><ul id="yesSchList">{items}</ul></body></html>"#
        )
    }

    fn item(href: &str) -> String {
        format!(
            r#"<li><div><div class="item_info"><div class="info_row info_name"><a class="gd_name" href="{href}">Book</a></div></div></div></li>"#
        )
    }

    #[test]
    fn takes_first_result() -> anyhow::Result<()> {
        let locator = PageLocator::catalog()?;
        let body = search_page(&format!(
            "{}{}",
            item("/Product/Goods/111"),
            item("/Product/Goods/222")
        ));
        assert_eq!(
            locator.first_result_href(&body).as_deref(),
            Some("/Product/Goods/111")
        );
        Ok(())
    }

    #[test]
    fn falls_back_to_loose_selector() -> anyhow::Result<()> {
        let locator = PageLocator::catalog()?;
        let body = search_page(r#"<li><p><a class="gd_name" href="/Product/Goods/9">x</a></p></li>"#);
        assert_eq!(
            locator.first_result_href(&body).as_deref(),
            Some("/Product/Goods/9")
        );
        Ok(())
    }

    #[test]
    fn empty_result_list_is_not_found() -> anyhow::Result<()> {
        let locator = PageLocator::catalog()?;
        assert_eq!(locator.first_result_href(&search_page("")), None);
        assert_eq!(locator.first_result_href(""), None);
        assert_eq!(locator.first_result_href(&search_page(&item("  "))), None);
        Ok(())
    }
}
