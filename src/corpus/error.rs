// Corpus lookup errors
// Every variant maps to a fixed public message; details stay in the logs

use hyper::StatusCode;
use std::path::PathBuf;

use super::model::BookDecodeError;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("book '{0}' not found")]
    BookNotFound(String),
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed book file {}: {source}", path.display())]
    MalformedBook {
        path: PathBuf,
        source: BookDecodeError,
    },
    #[error("chapter not found")]
    ChapterNotFound,
    #[error("verse not found")]
    VerseNotFound,
    #[error("no book files available")]
    NoBooksAvailable,
    #[error("books list not found")]
    BookListNotFound,
    #[error("malformed books list {}: {source}", path.display())]
    MalformedBookList {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl CorpusError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBook { .. } | Self::MalformedBookList { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::NOT_FOUND,
        }
    }

    /// Message sent to the client in `{"error": ...}`
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::BookNotFound(_) | Self::Unreadable { .. } => "Book not found",
            Self::MalformedBook { .. } => "Book data is malformed",
            Self::ChapterNotFound => "Chapter not found",
            Self::VerseNotFound => "Verse not found",
            Self::NoBooksAvailable => "No books available",
            Self::BookListNotFound => "Books list not found",
            Self::MalformedBookList { .. } => "Books list is malformed",
        }
    }

    /// Whether the failure points at a broken corpus rather than a bad request
    pub const fn is_corpus_fault(&self) -> bool {
        matches!(
            self,
            Self::Unreadable { .. } | Self::MalformedBook { .. } | Self::MalformedBookList { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_messages_hide_paths() {
        let err = CorpusError::Unreadable {
            path: PathBuf::from("/srv/bibles/Genesis.json"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Book not found");
        assert!(err.to_string().contains("Genesis.json"));
        assert!(err.is_corpus_fault());
    }

    #[test]
    fn test_malformed_is_server_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CorpusError::MalformedBookList {
            path: PathBuf::from("1611b/Books.json"),
            source,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Books list is malformed");
    }

    #[test]
    fn test_lookup_stage_messages() {
        assert_eq!(CorpusError::BookNotFound("x".into()).public_message(), "Book not found");
        assert_eq!(CorpusError::ChapterNotFound.public_message(), "Chapter not found");
        assert_eq!(CorpusError::VerseNotFound.public_message(), "Verse not found");
        assert_eq!(CorpusError::NoBooksAvailable.public_message(), "No books available");
        assert_eq!(CorpusError::BookListNotFound.public_message(), "Books list not found");
        assert!(!CorpusError::VerseNotFound.is_corpus_fault());
    }
}
