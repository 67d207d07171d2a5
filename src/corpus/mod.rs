//! Corpus loader module
//!
//! Reads per-book JSON files for the standard and 1611 editions straight from disk.
//! Nothing is cached: every call goes back to the file system.

mod error;
mod model;

pub use error::CorpusError;
pub use model::{Book, Chapter, Verse};

use crate::config::CorpusConfig;
use crate::logger;
use hyper::body::Bytes;
use rand::seq::IndexedRandom;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const BOOK_EXTENSION: &str = "json";

/// Corpus variant selected by the request path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    Standard,
    /// 1611 King James text, selected by the `/1611` prefix
    Kjv1611,
}

impl Edition {
    pub const KJV1611_PREFIX: &'static str = "1611";
}

/// Read-only view over the edition directories
#[derive(Debug, Clone)]
pub struct Corpus {
    standard_dir: PathBuf,
    kjv1611_dir: PathBuf,
    book_list_file: String,
}

impl Corpus {
    pub fn new(config: &CorpusConfig) -> Self {
        Self {
            standard_dir: PathBuf::from(&config.standard_dir),
            kjv1611_dir: PathBuf::from(&config.kjv1611_dir),
            book_list_file: config.book_list_file.clone(),
        }
    }

    pub fn edition_dir(&self, edition: Edition) -> &Path {
        match edition {
            Edition::Standard => &self.standard_dir,
            Edition::Kjv1611 => &self.kjv1611_dir,
        }
    }

    /// Load and decode `<edition dir>/<book_id>.json`
    ///
    /// The identifier is tried verbatim first, then with its first letter upper-cased,
    /// so `/genesis` finds `Genesis.json` in either edition.
    pub async fn load_book(&self, book_id: &str, edition: Edition) -> Result<Book, CorpusError> {
        if !is_valid_book_id(book_id) {
            return Err(CorpusError::BookNotFound(book_id.to_string()));
        }

        let dir = self.edition_dir(edition);
        for candidate in candidate_file_stems(book_id) {
            let file_name = format!("{candidate}.{BOOK_EXTENSION}");
            if self.is_book_list(edition, &file_name) {
                continue;
            }
            let path = dir.join(file_name);
            match fs::read(&path).await {
                Ok(data) => {
                    return Book::from_slice(&data)
                        .map_err(|source| CorpusError::MalformedBook { path, source });
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(CorpusError::Unreadable { path, source }),
            }
        }

        Err(CorpusError::BookNotFound(book_id.to_string()))
    }

    /// List the identifiers (file stems) of every book in an edition
    pub async fn list_book_ids(&self, edition: Edition) -> Result<Vec<String>, CorpusError> {
        let dir = self.edition_dir(edition);
        let mut entries = fs::read_dir(dir).await.map_err(|e| {
            logger::log_warning(&format!(
                "Corpus directory '{}' cannot be listed: {e}",
                dir.display()
            ));
            CorpusError::NoBooksAvailable
        })?;

        let mut ids = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    logger::log_warning(&format!(
                        "Failed to read entry in '{}': {e}",
                        dir.display()
                    ));
                    break;
                }
            };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| self.is_book_list(edition, n))
            {
                continue;
            }
            // metadata follows symlinks; a linked book file is still a book
            if !fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_book_id(stem) {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    /// Pick one book identifier uniformly at random
    pub async fn pick_random_book_id(&self, edition: Edition) -> Result<String, CorpusError> {
        let ids = self.list_book_ids(edition).await?;
        pick_random(&ids)
            .cloned()
            .ok_or(CorpusError::NoBooksAvailable)
    }

    /// Raw bytes of the 1611 edition's book list, after checking they are valid JSON
    pub async fn load_book_list(&self) -> Result<Bytes, CorpusError> {
        let path = self.kjv1611_dir.join(&self.book_list_file);
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() != ErrorKind::NotFound {
                logger::log_warning(&format!("Failed to read '{}': {e}", path.display()));
            }
            CorpusError::BookListNotFound
        })?;

        if let Err(source) = serde_json::from_slice::<serde::de::IgnoredAny>(&data) {
            return Err(CorpusError::MalformedBookList { path, source });
        }
        Ok(Bytes::from(data))
    }

    /// The 1611 book list shares the directory with the books but is never one
    fn is_book_list(&self, edition: Edition, file_name: &str) -> bool {
        edition == Edition::Kjv1611 && file_name == self.book_list_file
    }

    /// Readiness: the standard edition directory must exist
    pub async fn is_ready(&self) -> bool {
        fs::metadata(&self.standard_dir)
            .await
            .is_ok_and(|m| m.is_dir())
    }
}

/// Uniform random element; `None` for an empty slice
pub fn pick_random<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::rng())
}

/// Parse a chapter or verse number taken from the URL
pub fn parse_number(label: &str) -> Option<i64> {
    label.parse().ok()
}

/// Chapter whose stored number equals the numeric value of `label`
pub fn find_chapter<'a>(book: &'a Book, label: &str) -> Result<&'a Chapter, CorpusError> {
    parse_number(label)
        .and_then(|n| book.chapter(n))
        .ok_or(CorpusError::ChapterNotFound)
}

pub fn find_verse<'a>(chapter: &'a Chapter, label: &str) -> Result<&'a Verse, CorpusError> {
    parse_number(label)
        .and_then(|n| chapter.verse(n))
        .ok_or(CorpusError::VerseNotFound)
}

pub fn random_chapter(book: &Book) -> Result<&Chapter, CorpusError> {
    pick_random(&book.chapters).ok_or(CorpusError::ChapterNotFound)
}

pub fn random_verse(chapter: &Chapter) -> Result<&Verse, CorpusError> {
    pick_random(&chapter.verses).ok_or(CorpusError::VerseNotFound)
}

/// Book identifiers name a single file inside the edition directory
fn is_valid_book_id(book_id: &str) -> bool {
    !book_id.is_empty()
        && !book_id.starts_with('.')
        && !book_id.contains(['/', '\\', '\0'])
}

fn candidate_file_stems(book_id: &str) -> Vec<String> {
    let mut stems = vec![book_id.to_string()];
    let mut chars = book_id.chars();
    if let Some(first) = chars.next() {
        let capitalized: String = first.to_uppercase().chain(chars).collect();
        if capitalized != book_id {
            stems.push(capitalized);
        }
    }
    stems
}
