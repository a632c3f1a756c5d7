use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::formats::BookRecord;
use crate::normalize::note_file_stem;

pub fn note_path(folder: &Path, record: &BookRecord) -> anyhow::Result<PathBuf> {
    let stem = note_file_stem(&record.title);
    if stem.trim().is_empty() {
        anyhow::bail!("book title has no usable file name characters: {:?}", record.title);
    }
    Ok(folder.join(format!("{}.md", stem.trim())))
}

/// Writes the record's document into `folder`, never overwriting an existing note.
pub fn write_note(folder: &Path, record: &BookRecord) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(folder)
        .with_context(|| format!("create note folder: {}", folder.display()))?;

    let path = note_path(folder, record)?;
    if path.exists() {
        anyhow::bail!("note already exists: {}", path.display());
    }

    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(&path)
        .with_context(|| format!("create note: {}", path.display()))?;
    file.write_all(record.document.as_bytes())
        .with_context(|| format!("write note: {}", path.display()))?;
    file.flush()
        .with_context(|| format!("flush note: {}", path.display()))?;

    tracing::debug!(path = %path.display(), "wrote note");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> BookRecord {
        BookRecord {
            title: title.to_owned(),
            document: "---\ntitle: x\n---\n".to_owned(),
        }
    }

    #[test]
    fn writes_note_under_sanitized_name() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        let folder = temp.path().join("books");

        let path = write_note(&folder, &record("Design A Pattern Language, 2nd ed."))?;

        assert_eq!(path, folder.join("Design A Pattern Language 2nd ed.md"));
        assert_eq!(std::fs::read_to_string(&path)?, "---\ntitle: x\n---\n");
        Ok(())
    }

    #[test]
    fn refuses_to_overwrite() -> anyhow::Result<()> {
        let temp = tempfile::TempDir::new()?;
        write_note(temp.path(), &record("Same"))?;
        assert!(write_note(temp.path(), &record("Same")).is_err());
        Ok(())
    }

    #[test]
    fn keeps_full_width_slash() -> anyhow::Result<()> {
        let path = note_path(Path::new("notes"), &record("Input／Output"))?;
        assert_eq!(path, Path::new("notes").join("Input／Output.md"));
        Ok(())
    }

    #[test]
    fn rejects_title_with_nothing_left() {
        assert!(note_path(Path::new("."), &record("?!...")).is_err());
    }
}
