use serde::{Deserialize, Serialize};

pub const SENTINEL_TAG: &str = "📚Book";
pub const NO_TITLE: &str = "No title";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub main_title: String,
    pub sub_title: Option<String>,
    /// Deduplicated, first-seen order; always starts with [`SENTINEL_TAG`].
    pub tags: Vec<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<String>,
    pub cover_url: String,
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self {
            main_title: NO_TITLE.to_owned(),
            sub_title: None,
            tags: vec![SENTINEL_TAG.to_owned()],
            authors: Vec::new(),
            publish_date: None,
            cover_url: String::new(),
        }
    }
}

/// Field order here is the key order of the serialized block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFrontMatter {
    pub created: String,
    pub tag: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub publish_date: String,
    pub cover_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    pub title: String,
    pub document: String,
}
