//! Review sheets built from parsed books.
//!
//! A book arrives as JSON (book -> chapters -> verses). Every verse becomes one
//! CSV row whose `corrected_text` starts out as the canonical form of the
//! verse, ready for a reviewer to fix and feed back into [`crate::dataset`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DatasetError;
use crate::nikud::canonicalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub original_text: String,
    pub corrected_text: String,
}

pub fn load_book(path: &Path) -> Result<Book, DatasetError> {
    let raw = fs::read_to_string(path).map_err(|source| DatasetError::BookUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| DatasetError::BookMalformed {
        path: path.to_path_buf(),
        source,
    })
}

pub fn review_rows(book: &Book) -> Vec<ReviewRow> {
    book.chapters
        .iter()
        .flat_map(|chapter| {
            chapter.verses.iter().map(move |verse| {
                let original = verse.text.trim();
                ReviewRow {
                    book: book.name.clone(),
                    chapter: chapter.number,
                    verse: verse.number,
                    original_text: original.to_string(),
                    corrected_text: canonicalize(original),
                }
            })
        })
        .collect()
}

pub fn write_review_csv(rows: &[ReviewRow], path: &Path) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DatasetError::DestinationUnwritable {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let unwritable = |source| DatasetError::ReviewUnwritable {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(unwritable)?;
    for row in rows {
        writer.serialize(row).map_err(unwritable)?;
    }
    writer
        .flush()
        .map_err(|source| unwritable(csv::Error::from(source)))?;

    info!(path = %path.display(), rows = rows.len(), "wrote review sheet");
    Ok(())
}
