//! JSON response envelopes

use serde::Serialize;

use crate::corpus::{Book, Chapter, Verse};

/// A chapter or verse number: echoed as requested, or the stored value for random picks
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Number<'a> {
    Requested(&'a str),
    Stored(i64),
}

#[derive(Debug, Serialize)]
pub struct BookPayload<'a> {
    pub book: &'a str,
    pub chapter_count: usize,
    pub chapters: Vec<ChapterSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChapterSummary<'a> {
    pub chapter: i64,
    pub verses_count: usize,
    pub verses: &'a [Verse],
}

#[derive(Debug, Serialize)]
pub struct ChapterPayload<'a> {
    pub book: &'a str,
    pub chapter: Number<'a>,
    pub verses_count: usize,
    pub verses: &'a [Verse],
}

#[derive(Debug, Serialize)]
pub struct VersePayload<'a> {
    pub book: &'a str,
    pub chapter: Number<'a>,
    pub verse: Number<'a>,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload<'a> {
    pub error: &'a str,
}

impl<'a> BookPayload<'a> {
    pub fn new(book_id: &'a str, book: &'a Book) -> Self {
        Self {
            book: book_id,
            chapter_count: book.chapters.len(),
            chapters: book
                .chapters
                .iter()
                .map(|c| ChapterSummary {
                    chapter: c.chapter,
                    verses_count: c.verses.len(),
                    verses: &c.verses,
                })
                .collect(),
        }
    }
}

impl<'a> ChapterPayload<'a> {
    pub fn new(book_id: &'a str, chapter: Number<'a>, found: &'a Chapter) -> Self {
        Self {
            book: book_id,
            chapter,
            verses_count: found.verses.len(),
            verses: &found.verses,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WelcomePayload {
    pub message: &'static str,
    pub guidelines: &'static [&'static str],
    pub thanks: &'static str,
    pub credits: &'static str,
}

pub const WELCOME: WelcomePayload = WelcomePayload {
    message: "Hello Wary Traveller, This is a free open source Bible API. Here are the usage guidelines:",
    guidelines: &[
        "To get the content of a specific book: /{book}",
        "To get the content of a specific chapter: /{book}/{chapter}",
        "To get the content of a specific verse: /{book}/{chapter}/{verse}",
        "To get a random book: /random",
        "To get a random chapter: /random/chapter",
        "To get a random verse: /random/chapter/verse",
        "To get the list of books from 1611 KJV: /1611",
        "To get the content of a specific book from 1611 KJV: /1611/{book}",
        "To get the content of a specific chapter from 1611 KJV: /1611/{book}/{chapter}",
        "To get the content of a specific verse from 1611 KJV: /1611/{book}/{chapter}/{verse}",
        "To get a random book from 1611 KJV: /1611/random",
        "To get a random chapter from 1611 KJV: /1611/random/chapter",
        "To get a random verse from 1611 KJV: /1611/random/chapter/verse",
    ],
    thanks: "Thanks for your considered support",
    credits: "https://aruljohn.com/",
};
