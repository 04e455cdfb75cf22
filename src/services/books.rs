//! Book service

use std::{collections::HashMap, sync::Arc};

use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookData},
    repository::CatalogStore,
};

/// Row of the book list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookListEntry {
    pub title: String,
    pub url: String,
    /// Empty when the author record is gone
    pub author_name: String,
}

/// A book with its author, for the detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
}

#[derive(Clone)]
pub struct BooksService {
    store: Arc<dyn CatalogStore>,
}

impl BooksService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// All books by title, with author names resolved
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let (books, authors) =
            tokio::try_join!(self.store.books_list(), self.store.authors_list())?;

        let names: HashMap<Uuid, String> = authors.iter().map(|a| (a.id, a.name())).collect();
        Ok(books
            .iter()
            .map(|book| BookListEntry {
                title: book.title.clone(),
                url: book.url(),
                author_name: names.get(&book.author_id).cloned().unwrap_or_default(),
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let book = self
            .store
            .books_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        let author = self.store.authors_get_by_id(book.author_id).await?;
        Ok(BookDetail { book, author })
    }

    /// Insert a book; the referenced author must exist
    pub async fn create(&self, data: &BookData) -> AppResult<Book> {
        if self.store.authors_get_by_id(data.author_id).await?.is_none() {
            return Err(AppError::BadRequest("Author not found".to_string()));
        }
        let book = self.store.books_create(data).await?;
        tracing::info!("Book created: id={} author={}", book.id, book.author_id);
        Ok(book)
    }
}
