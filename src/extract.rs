use std::collections::HashSet;

use anyhow::Context as _;
use scraper::{ElementRef, Html, Selector};

use crate::formats::{ExtractedFields, NO_TITLE, SENTINEL_TAG};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Tags,
    MainTitle,
    SubTitle,
    Authors,
    PublishDate,
    CoverUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Read {
    Text,
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collect {
    FirstMatch,
    AllMatches,
}

#[derive(Debug, Clone, Copy)]
pub struct ReadPath {
    pub selector: &'static str,
    pub read: Read,
}

impl ReadPath {
    pub const fn text(selector: &'static str) -> Self {
        Self {
            selector,
            read: Read::Text,
        }
    }

    pub const fn attr(selector: &'static str, name: &'static str) -> Self {
        Self {
            selector,
            read: Read::Attr(name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldStrategy {
    pub field: Field,
    pub collect: Collect,
    pub paths: &'static [ReadPath],
}

// One row per field; paths are tried in order.
pub const CATALOG_FIELDS: &[FieldStrategy] = &[
    FieldStrategy {
        field: Field::Tags,
        collect: Collect::AllMatches,
        paths: &[ReadPath::text(
            "#infoset_goodsCate > div.infoSetCont_wrap > dl:nth-child(1) > dd > ul > li > a",
        )],
    },
    FieldStrategy {
        field: Field::MainTitle,
        collect: Collect::FirstMatch,
        paths: &[ReadPath::text(
            "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > div > h2",
        )],
    },
    FieldStrategy {
        field: Field::SubTitle,
        collect: Collect::FirstMatch,
        paths: &[ReadPath::text(
            "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > div > h3",
        )],
    },
    FieldStrategy {
        field: Field::Authors,
        collect: Collect::AllMatches,
        paths: &[
            ReadPath::text(
                "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > span.gd_pubArea > span.gd_auth > a",
            ),
            ReadPath::text(
                "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > span.gd_pubArea > span.gd_auth > span > span.moreAuthLi > span > ul > li > a",
            ),
        ],
    },
    FieldStrategy {
        field: Field::PublishDate,
        collect: Collect::FirstMatch,
        paths: &[ReadPath::text(
            "#yDetailTopWrap > div.topColRgt > div.gd_infoTop > span.gd_pubArea > span.gd_date",
        )],
    },
    FieldStrategy {
        field: Field::CoverUrl,
        collect: Collect::FirstMatch,
        paths: &[
            ReadPath::attr(
                "#yDetailTopWrap > div.topColLft > div > div.gd_3dGrp > div > span.gd_img > em > img",
                "src",
            ),
            ReadPath::attr(
                "#yDetailTopWrap > div.topColLft > div > span > em > img",
                "src",
            ),
        ],
    },
];

#[derive(Debug)]
struct CompiledPath {
    selector: Selector,
    read: Read,
}

#[derive(Debug)]
struct CompiledStrategy {
    field: Field,
    collect: Collect,
    paths: Vec<CompiledPath>,
}

#[derive(Debug)]
pub struct FieldReader {
    strategies: Vec<CompiledStrategy>,
}

impl FieldReader {
    pub fn new(table: &[FieldStrategy]) -> anyhow::Result<Self> {
        let strategies = table
            .iter()
            .map(|strategy| {
                let paths = strategy
                    .paths
                    .iter()
                    .map(|path| {
                        Ok(CompiledPath {
                            selector: parse_selector(path.selector)?,
                            read: path.read,
                        })
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
                    .with_context(|| format!("compile read paths for {:?}", strategy.field))?;
                Ok(CompiledStrategy {
                    field: strategy.field,
                    collect: strategy.collect,
                    paths,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { strategies })
    }

    pub fn catalog() -> anyhow::Result<Self> {
        Self::new(CATALOG_FIELDS)
    }

    pub fn read(&self, html: &Html, field: Field) -> Vec<String> {
        let Some(strategy) = self.strategies.iter().find(|s| s.field == field) else {
            return Vec::new();
        };

        match strategy.collect {
            Collect::AllMatches => strategy
                .paths
                .iter()
                .flat_map(|path| {
                    let read = path.read;
                    html.select(&path.selector)
                        .filter_map(move |el| read_value(el, read))
                })
                .collect(),
            Collect::FirstMatch => strategy
                .paths
                .iter()
                .find_map(|path| {
                    html.select(&path.selector)
                        .next()
                        .and_then(|el| read_value(el, path.read))
                        .filter(|value| !value.trim().is_empty())
                })
                .into_iter()
                .collect(),
        }
    }

    fn read_one(&self, html: &Html, field: Field) -> Option<String> {
        self.read(html, field).into_iter().next()
    }

    pub fn extract(&self, html: &Html) -> ExtractedFields {
        let tags = self
            .read(html, Field::Tags)
            .into_iter()
            .map(|tag| tag.chars().filter(|ch| !ch.is_whitespace()).collect::<String>())
            .filter(|tag| !tag.is_empty());
        let tags = dedup_preserving_order(std::iter::once(SENTINEL_TAG.to_owned()).chain(tags));

        let authors = self
            .read(html, Field::Authors)
            .into_iter()
            .map(|author| author.trim().to_owned())
            .filter(|author| !author.is_empty());
        let authors = dedup_preserving_order(authors);

        let main_title = self
            .read_one(html, Field::MainTitle)
            .unwrap_or_else(|| NO_TITLE.to_owned());
        let sub_title = self.read_one(html, Field::SubTitle);
        let publish_date = self
            .read_one(html, Field::PublishDate)
            .and_then(|label| publish_date_from_label(&label));
        let cover_url = self
            .read_one(html, Field::CoverUrl)
            .map(|src| src.trim().to_owned())
            .unwrap_or_default();

        ExtractedFields {
            main_title,
            sub_title,
            tags,
            authors,
            publish_date,
            cover_url,
        }
    }
}

pub fn parse_selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|err| anyhow::anyhow!("parse selector {css:?}: {err:?}"))
}

/// The HTML parser accepts anything, so only a body with no markup is rejected.
pub fn parse_page(body: &str) -> anyhow::Result<Html> {
    if !looks_like_html(body) {
        anyhow::bail!("response body is not an html document");
    }
    Ok(Html::parse_document(body))
}

pub fn extract_fields(reader: &FieldReader, body: &str) -> anyhow::Result<ExtractedFields> {
    let html = parse_page(body).context("parse catalog page")?;
    Ok(reader.extract(&html))
}

fn looks_like_html(body: &str) -> bool {
    if body.trim().is_empty() {
        return false;
    }
    let lowered = body.trim_start().to_ascii_lowercase();
    lowered.starts_with("<!doctype html") || lowered.contains("<html") || lowered.contains("<body")
}

fn read_value(element: ElementRef<'_>, read: Read) -> Option<String> {
    match read {
        Read::Text => Some(element.text().collect()),
        Read::Attr(name) => element.value().attr(name).map(str::to_owned),
    }
}

/// `"2019년 03월 15일"` becomes `"2019-03-15"`: each token loses its unit suffix.
pub fn publish_date_from_label(label: &str) -> Option<String> {
    let tokens = label
        .split_whitespace()
        .map(|token| {
            let mut chars = token.chars();
            chars.next_back();
            chars.as_str()
        })
        .collect::<Vec<_>>();
    if tokens.is_empty() {
        return None;
    }
    Some(tokens.join("-"))
}

pub fn dedup_preserving_order(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
