use anyhow::Context as _;
use chrono::{DateTime, Local, NaiveTime, TimeDelta, Utc};

use crate::formats::{BookFrontMatter, BookRecord, ExtractedFields};
use crate::normalize::record_title;

/// The date part of `created` is taken at UTC+9.
pub const CREATED_DATE_OFFSET_SECS: i64 = 9 * 60 * 60;

/// `YYYY-MM-DD HH:MM`, date from the shifted instant and time from the local clock.
#[must_use]
pub fn created_timestamp(now: DateTime<Utc>, local_time: NaiveTime) -> String {
    let shifted = now + TimeDelta::seconds(CREATED_DATE_OFFSET_SECS);
    format!(
        "{} {}",
        shifted.format("%Y-%m-%d"),
        local_time.format("%H:%M")
    )
}

#[must_use]
pub fn created_now() -> String {
    created_timestamp(Utc::now(), Local::now().time())
}

pub fn front_matter(
    fields: &ExtractedFields,
    normalized_title: &str,
    created: String,
) -> BookFrontMatter {
    BookFrontMatter {
        created,
        tag: fields.tags.join(" "),
        title: normalized_title.to_owned(),
        author: fields.authors.join(", "),
        category: fields.tags.get(1).cloned().unwrap_or_default(),
        publish_date: fields.publish_date.clone().unwrap_or_default(),
        cover_url: fields.cover_url.clone(),
    }
}

pub fn render_document(front: &BookFrontMatter) -> anyhow::Result<String> {
    let yaml = serde_yaml::to_string(front).context("serialize book front matter")?;
    Ok(format!("---\n{yaml}---\n"))
}

pub fn assemble(
    fields: &ExtractedFields,
    normalized_title: &str,
    created: String,
) -> anyhow::Result<BookRecord> {
    let front = front_matter(fields, normalized_title, created);
    let document = render_document(&front)?;
    Ok(BookRecord {
        title: record_title(normalized_title),
        document,
    })
}

pub fn parse_front_matter(contents: &str) -> anyhow::Result<BookFrontMatter> {
    let yaml = front_matter_block(contents)?;
    serde_yaml::from_str(&yaml).context("deserialize book front matter")
}

fn front_matter_block(contents: &str) -> anyhow::Result<String> {
    let mut lines = contents.lines();
    let first = lines
        .next()
        .ok_or_else(|| anyhow::anyhow!("document is empty"))?;
    if first.trim_end() != "---" {
        anyhow::bail!("document must start with YAML front matter ('---')");
    }

    let mut yaml_lines = Vec::new();
    for line in lines {
        if line.trim_end() == "---" {
            return Ok(yaml_lines.join("\n"));
        }
        yaml_lines.push(line);
    }
    anyhow::bail!("front matter is not closed with '---'")
}
