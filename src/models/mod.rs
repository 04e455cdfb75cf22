//! Data models for the catalog

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorView};
pub use book::{Book, BookData, BookDraft, BookSummary, BookView};
