//! Scripture lookups
//!
//! Each route loads from the corpus and projects into one envelope. Lookups run
//! book → chapter → verse and stop at the first stage that fails.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::payload::{BookPayload, ChapterPayload, ErrorPayload, Number, VersePayload, WELCOME};
use super::router::RequestContext;
use super::routes::Route;
use crate::corpus::{self, Corpus, CorpusError, Edition};
use crate::logger;

type Reply = Result<Response<Full<Bytes>>, CorpusError>;

/// Answer a classified route
pub async fn respond(
    ctx: &RequestContext<'_>,
    corpus: &Corpus,
    route: &Route,
) -> Response<Full<Bytes>> {
    let reply = match route {
        Route::Welcome => Ok(ctx.json(StatusCode::OK, &WELCOME)),
        Route::BookList => serve_book_list(ctx, corpus).await,
        Route::Book { edition, book } => serve_book(ctx, corpus, book, *edition).await,
        Route::RandomBook { edition } => serve_random_book(ctx, corpus, *edition).await,
        Route::Chapter {
            edition,
            book,
            chapter,
        } => serve_chapter(ctx, corpus, book, chapter, *edition).await,
        Route::RandomChapter { edition } => serve_random_chapter(ctx, corpus, *edition).await,
        Route::Verse {
            edition,
            book,
            chapter,
            verse,
        } => serve_verse(ctx, corpus, book, chapter, verse, *edition).await,
        Route::RandomVerse { edition } => serve_random_verse(ctx, corpus, *edition).await,
    };

    reply.unwrap_or_else(|err| error_response(ctx, &err))
}

/// Map a lookup failure to its public `{"error": ...}` envelope
pub fn error_response(ctx: &RequestContext<'_>, err: &CorpusError) -> Response<Full<Bytes>> {
    if err.is_corpus_fault() {
        logger::log_error(&format!("{} -> {err}", ctx.path));
    } else {
        logger::log_debug(&format!("{} -> {err}", ctx.path));
    }
    ctx.json(
        err.status(),
        &ErrorPayload {
            error: err.public_message(),
        },
    )
}

async fn serve_book_list(ctx: &RequestContext<'_>, corpus: &Corpus) -> Reply {
    let list = corpus.load_book_list().await?;
    Ok(ctx.raw_json(StatusCode::OK, list))
}

async fn serve_book(
    ctx: &RequestContext<'_>,
    corpus: &Corpus,
    book_id: &str,
    edition: Edition,
) -> Reply {
    let book = corpus.load_book(book_id, edition).await?;
    Ok(ctx.json(StatusCode::OK, &BookPayload::new(book_id, &book)))
}

async fn serve_random_book(ctx: &RequestContext<'_>, corpus: &Corpus, edition: Edition) -> Reply {
    let book_id = corpus.pick_random_book_id(edition).await?;
    serve_book(ctx, corpus, &book_id, edition).await
}

async fn serve_chapter(
    ctx: &RequestContext<'_>,
    corpus: &Corpus,
    book_id: &str,
    chapter: &str,
    edition: Edition,
) -> Reply {
    let book = corpus.load_book(book_id, edition).await?;
    let found = corpus::find_chapter(&book, chapter)?;
    Ok(ctx.json(
        StatusCode::OK,
        &ChapterPayload::new(book_id, Number::Requested(chapter), found),
    ))
}

async fn serve_random_chapter(
    ctx: &RequestContext<'_>,
    corpus: &Corpus,
    edition: Edition,
) -> Reply {
    let book_id = corpus.pick_random_book_id(edition).await?;
    let book = corpus.load_book(&book_id, edition).await?;
    let found = corpus::random_chapter(&book)?;
    Ok(ctx.json(
        StatusCode::OK,
        &ChapterPayload::new(&book_id, Number::Stored(found.chapter), found),
    ))
}

async fn serve_verse(
    ctx: &RequestContext<'_>,
    corpus: &Corpus,
    book_id: &str,
    chapter: &str,
    verse: &str,
    edition: Edition,
) -> Reply {
    let book = corpus.load_book(book_id, edition).await?;
    let found_chapter = corpus::find_chapter(&book, chapter)?;
    let found = corpus::find_verse(found_chapter, verse)?;
    Ok(ctx.json(
        StatusCode::OK,
        &VersePayload {
            book: book_id,
            chapter: Number::Requested(chapter),
            verse: Number::Requested(verse),
            content: &found.text,
        },
    ))
}

async fn serve_random_verse(ctx: &RequestContext<'_>, corpus: &Corpus, edition: Edition) -> Reply {
    let book_id = corpus.pick_random_book_id(edition).await?;
    let book = corpus.load_book(&book_id, edition).await?;
    let found_chapter = corpus::random_chapter(&book)?;
    let found = corpus::random_verse(found_chapter)?;
    Ok(ctx.json(
        StatusCode::OK,
        &VersePayload {
            book: &book_id,
            chapter: Number::Stored(found_chapter.chapter),
            verse: Number::Stored(found.verse),
            content: &found.text,
        },
    ))
}
