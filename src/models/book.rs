//! Book model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{Check, FieldRules, Outcome, Pipeline, Sanitizer};

/// Full book record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
}

impl Book {
    pub fn url(&self) -> String {
        book_url(self.id)
    }
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

/// Projection used when listing an author's books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}

/// Book fields for templates, with its locator
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<&BookSummary> for BookView {
    fn from(book: &BookSummary) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book_url(book.id),
        }
    }
}

/// Sanitized book form, valid or not; `author` stays text until checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
}

/// Validated book fields ready for insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
}

impl BookDraft {
    /// Rules for the book create form
    pub fn pipeline() -> Pipeline {
        Pipeline::new()
            .field(FieldRules::required_text("title", "Title must not be empty."))
            .field(
                FieldRules::new("author")
                    .check(Check::NotEmpty("Author must not be empty.".to_string()))
                    .check(Check::Identifier("Author must not be empty.".to_string()))
                    .sanitize(Sanitizer::Trim),
            )
            .field(FieldRules::required_text("summary", "Summary must not be empty."))
            .field(FieldRules::required_text("isbn", "ISBN must not be empty"))
    }

    /// `None` when the author reference is not an identifier
    pub fn to_data(&self) -> Option<BookData> {
        let author_id = Uuid::parse_str(&self.author).ok()?;
        Some(BookData {
            title: self.title.clone(),
            author_id,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
        })
    }
}

impl From<&Outcome> for BookDraft {
    fn from(outcome: &Outcome) -> Self {
        Self {
            title: outcome.text("title"),
            author: outcome.text("author"),
            summary: outcome.text("summary"),
            isbn: outcome.text("isbn"),
        }
    }
}
