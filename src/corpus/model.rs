//! Book / chapter / verse data model
//!
//! One JSON file holds one book:
//! `{ "chapters": [ { "chapter": 1, "verses": [ { "verse": 1, "text": "..." } ] } ] }`

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A decoded book file
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Book {
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Chapter {
    pub chapter: i64,
    pub verses: Vec<Verse>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Verse {
    pub verse: i64,
    pub text: String,
}

/// Reasons a book file can be present but unusable
#[derive(Debug, thiserror::Error)]
pub enum BookDecodeError {
    #[error("invalid book JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chapter {0} appears more than once")]
    DuplicateChapter(i64),
    #[error("verse {verse} appears more than once in chapter {chapter}")]
    DuplicateVerse { chapter: i64, verse: i64 },
}

impl Book {
    /// Decode a book file and check that chapter and verse numbers are unique
    pub fn from_slice(data: &[u8]) -> Result<Self, BookDecodeError> {
        let book: Self = serde_json::from_slice(data)?;
        book.validate()?;
        Ok(book)
    }

    fn validate(&self) -> Result<(), BookDecodeError> {
        let mut chapters = HashSet::with_capacity(self.chapters.len());
        for chapter in &self.chapters {
            if !chapters.insert(chapter.chapter) {
                return Err(BookDecodeError::DuplicateChapter(chapter.chapter));
            }
            let mut verses = HashSet::with_capacity(chapter.verses.len());
            for verse in &chapter.verses {
                if !verses.insert(verse.verse) {
                    return Err(BookDecodeError::DuplicateVerse {
                        chapter: chapter.chapter,
                        verse: verse.verse,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn chapter(&self, number: i64) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.chapter == number)
    }
}

impl Chapter {
    pub fn verse(&self, number: i64) -> Option<&Verse> {
        self.verses.iter().find(|v| v.verse == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = r#"{"chapters":[
        {"chapter":1,"verses":[{"verse":1,"text":"In the beginning..."},{"verse":2,"text":"And the earth..."}]},
        {"chapter":3,"verses":[{"verse":1,"text":"Now the serpent..."}]}
    ]}"#;

    #[test]
    fn test_decode_book() {
        let book = Book::from_slice(GENESIS.as_bytes()).unwrap();
        assert_eq!(book.chapters.len(), 2);
        assert_eq!(book.chapters[0].verses[1].text, "And the earth...");
    }

    #[test]
    fn test_lookup_by_number_not_position() {
        let book = Book::from_slice(GENESIS.as_bytes()).unwrap();
        assert!(book.chapter(2).is_none());
        let chapter = book.chapter(3).unwrap();
        assert_eq!(chapter.verse(1).unwrap().text, "Now the serpent...");
        assert!(chapter.verse(2).is_none());
    }

    #[test]
    fn test_reject_invalid_json() {
        let err = Book::from_slice(b"{\"chapters\": [").unwrap_err();
        assert!(matches!(err, BookDecodeError::Json(_)));

        // Wrong shape is also a decode error, not a missing book
        let err =
            Book::from_slice(br#"{"chapters": [{"chapter": "one", "verses": []}]}"#).unwrap_err();
        assert!(matches!(err, BookDecodeError::Json(_)));
    }

    #[test]
    fn test_reject_duplicate_numbers() {
        let dup_chapter = r#"{"chapters":[{"chapter":1,"verses":[]},{"chapter":1,"verses":[]}]}"#;
        assert!(matches!(
            Book::from_slice(dup_chapter.as_bytes()),
            Err(BookDecodeError::DuplicateChapter(1))
        ));

        let dup_verse = r#"{"chapters":[{"chapter":4,"verses":[{"verse":2,"text":"a"},{"verse":2,"text":"b"}]}]}"#;
        assert!(matches!(
            Book::from_slice(dup_verse.as_bytes()),
            Err(BookDecodeError::DuplicateVerse { chapter: 4, verse: 2 })
        ));
    }
}
