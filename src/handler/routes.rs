//! Route table
//!
//! Paths are classified by segment count and reserved words. The table below is shared by
//! both editions: a leading `1611` segment only switches the edition and is stripped before
//! matching, so every route exists identically under `/` and `/1611/`.

use crate::corpus::Edition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteKind {
    Book,
    RandomBook,
    Chapter,
    RandomChapter,
    Verse,
    RandomVerse,
}

use Segment::{Literal, Param};

/// Literal patterns come first so `/random` never reads as a book called "random"
const ROUTE_TABLE: &[(&[Segment], RouteKind)] = &[
    (&[Literal("random")], RouteKind::RandomBook),
    (&[Param("book")], RouteKind::Book),
    (&[Literal("random"), Literal("chapter")], RouteKind::RandomChapter),
    (&[Param("book"), Param("chapter")], RouteKind::Chapter),
    (
        &[Literal("random"), Literal("chapter"), Literal("verse")],
        RouteKind::RandomVerse,
    ),
    (
        &[Param("book"), Param("chapter"), Param("verse")],
        RouteKind::Verse,
    ),
];

/// A classified request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome,
    /// `/1611`: the 1611 edition's book list
    BookList,
    Book {
        edition: Edition,
        book: String,
    },
    RandomBook {
        edition: Edition,
    },
    Chapter {
        edition: Edition,
        book: String,
        chapter: String,
    },
    RandomChapter {
        edition: Edition,
    },
    Verse {
        edition: Edition,
        book: String,
        chapter: String,
        verse: String,
    },
    RandomVerse {
        edition: Edition,
    },
}

impl Route {
    /// Classify a request path; `None` when no pattern matches
    pub fn parse(path: &str) -> Option<Self> {
        let segments = split_segments(path);

        let (edition, rest) = match segments.split_first() {
            None => return Some(Self::Welcome),
            Some((first, rest)) if first == Edition::KJV1611_PREFIX => {
                if rest.is_empty() {
                    return Some(Self::BookList);
                }
                (Edition::Kjv1611, rest)
            }
            Some(_) => (Edition::Standard, segments.as_slice()),
        };

        let (pattern, kind) = ROUTE_TABLE
            .iter()
            .find(|(pattern, _)| matches_pattern(pattern, rest))?;

        let mut params = pattern
            .iter()
            .zip(rest)
            .filter(|(segment, _)| matches!(segment, Param(_)))
            .map(|(_, value)| value.clone());

        let route = match kind {
            RouteKind::Book => Self::Book {
                edition,
                book: params.next()?,
            },
            RouteKind::RandomBook => Self::RandomBook { edition },
            RouteKind::Chapter => Self::Chapter {
                edition,
                book: params.next()?,
                chapter: params.next()?,
            },
            RouteKind::RandomChapter => Self::RandomChapter { edition },
            RouteKind::Verse => Self::Verse {
                edition,
                book: params.next()?,
                chapter: params.next()?,
                verse: params.next()?,
            },
            RouteKind::RandomVerse => Self::RandomVerse { edition },
        };
        Some(route)
    }
}

/// Non-empty, percent-decoded path segments
fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            urlencoding::decode(s).map_or_else(|_| s.to_string(), std::borrow::Cow::into_owned)
        })
        .collect()
}

fn matches_pattern(pattern: &[Segment], segments: &[String]) -> bool {
    pattern.len() == segments.len()
        && pattern.iter().zip(segments).all(|(segment, value)| match segment {
            Literal(literal) => value == literal,
            Param(_) => true,
        })
}

fn render_pattern(pattern: &[Segment]) -> String {
    pattern
        .iter()
        .map(|segment| match segment {
            Literal(literal) => format!("/{literal}"),
            Param(name) => format!("/{{{name}}}"),
        })
        .collect()
}

/// Every accepted path pattern, derived from the route table
pub fn usage_patterns() -> Vec<String> {
    let mut patterns = vec!["/".to_string()];
    patterns.extend(ROUTE_TABLE.iter().map(|(pattern, _)| render_pattern(pattern)));
    patterns.push(format!("/{}", Edition::KJV1611_PREFIX));
    patterns.extend(ROUTE_TABLE.iter().map(|(pattern, _)| {
        format!("/{}{}", Edition::KJV1611_PREFIX, render_pattern(pattern))
    }));
    patterns
}

/// Error message for paths matching no pattern
pub fn invalid_url_message() -> String {
    format!("Invalid URL. Usage: {}", usage_patterns().join(" or "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(edition: Edition, book: &str) -> Route {
        Route::Book {
            edition,
            book: book.to_string(),
        }
    }

    #[test]
    fn test_root_and_book_list() {
        assert_eq!(Route::parse("/"), Some(Route::Welcome));
        assert_eq!(Route::parse(""), Some(Route::Welcome));
        assert_eq!(Route::parse("/1611"), Some(Route::BookList));
        assert_eq!(Route::parse("/1611/"), Some(Route::BookList));
    }

    #[test]
    fn test_standard_edition_routes() {
        assert_eq!(Route::parse("/genesis"), Some(book(Edition::Standard, "genesis")));
        assert_eq!(
            Route::parse("/random"),
            Some(Route::RandomBook { edition: Edition::Standard })
        );
        assert_eq!(
            Route::parse("/genesis/3"),
            Some(Route::Chapter {
                edition: Edition::Standard,
                book: "genesis".into(),
                chapter: "3".into(),
            })
        );
        assert_eq!(
            Route::parse("/random/chapter"),
            Some(Route::RandomChapter { edition: Edition::Standard })
        );
        assert_eq!(
            Route::parse("/genesis/1/1"),
            Some(Route::Verse {
                edition: Edition::Standard,
                book: "genesis".into(),
                chapter: "1".into(),
                verse: "1".into(),
            })
        );
        assert_eq!(
            Route::parse("/random/chapter/verse"),
            Some(Route::RandomVerse { edition: Edition::Standard })
        );
    }

    #[test]
    fn test_kjv1611_routes_mirror_standard() {
        assert_eq!(Route::parse("/1611/genesis"), Some(book(Edition::Kjv1611, "genesis")));
        assert_eq!(
            Route::parse("/1611/random"),
            Some(Route::RandomBook { edition: Edition::Kjv1611 })
        );
        assert_eq!(
            Route::parse("/1611/genesis/2"),
            Some(Route::Chapter {
                edition: Edition::Kjv1611,
                book: "genesis".into(),
                chapter: "2".into(),
            })
        );
        assert_eq!(
            Route::parse("/1611/random/chapter"),
            Some(Route::RandomChapter { edition: Edition::Kjv1611 })
        );
        assert_eq!(
            Route::parse("/1611/genesis/2/7"),
            Some(Route::Verse {
                edition: Edition::Kjv1611,
                book: "genesis".into(),
                chapter: "2".into(),
                verse: "7".into(),
            })
        );
        assert_eq!(
            Route::parse("/1611/random/chapter/verse"),
            Some(Route::RandomVerse { edition: Edition::Kjv1611 })
        );
    }

    #[test]
    fn test_partial_literals_fall_through_to_params() {
        // "random" followed by a number is a chapter of a book named "random"
        assert_eq!(
            Route::parse("/random/1"),
            Some(Route::Chapter {
                edition: Edition::Standard,
                book: "random".into(),
                chapter: "1".into(),
            })
        );
        assert_eq!(
            Route::parse("/random/chapter/1"),
            Some(Route::Verse {
                edition: Edition::Standard,
                book: "random".into(),
                chapter: "chapter".into(),
                verse: "1".into(),
            })
        );
    }

    #[test]
    fn test_invalid_shapes() {
        assert_eq!(Route::parse("/a/b/c/d"), None);
        assert_eq!(Route::parse("/random/chapter/verse/extra"), None);
        assert_eq!(Route::parse("/nonexistent/path/with/too/many/segments/here"), None);
        assert_eq!(Route::parse("/1611/a/b/c/d"), None);
    }

    #[test]
    fn test_segments_are_normalized() {
        assert_eq!(Route::parse("//genesis//"), Some(book(Edition::Standard, "genesis")));
        assert_eq!(
            Route::parse("/song%20of%20solomon"),
            Some(book(Edition::Standard, "song of solomon"))
        );
    }

    #[test]
    fn test_usage_lists_both_editions() {
        let message = invalid_url_message();
        assert!(message.starts_with("Invalid URL. Usage: / or /random or /{book}"));
        assert!(message.contains("/{book}/{chapter}/{verse}"));
        assert!(message.contains(" or /1611 or "));
        assert!(message.contains("/1611/random/chapter/verse"));
        assert_eq!(usage_patterns().len(), 14);
    }
}
