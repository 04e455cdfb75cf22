//! In-process catalog store
//!
//! Used when `database.backend = "memory"` and by the router tests. Each
//! operation takes the lock once, so single-record reads and writes are
//! atomic; nothing spans two operations.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Author, AuthorData, Book, BookData, BookSummary},
};

#[derive(Default)]
struct Tables {
    authors: HashMap<Uuid, Author>,
    books: HashMap<Uuid, Book>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        let mut authors: Vec<Author> = tables.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            (&a.family_name, &a.first_name).cmp(&(&b.family_name, &b.first_name))
        });
        Ok(authors)
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.authors.len() as i64)
    }

    async fn authors_create(&self, data: &AuthorData) -> AppResult<Author> {
        let author = Author::from_data(Uuid::new_v4(), data.clone());
        self.tables
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn authors_replace(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        let mut tables = self.tables.write().await;
        Ok(tables.authors.get_mut(&id).map(|slot| {
            *slot = Author::from_data(id, data.clone());
            slot.clone()
        }))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.tables.write().await.authors.remove(&id))
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let tables = self.tables.read().await;
        let mut books: Vec<BookSummary> = tables
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .map(BookSummary::from)
            .collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        let mut books: Vec<Book> = tables.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn books_get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.tables.read().await.books.get(&id).cloned())
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.books.len() as i64)
    }

    async fn books_create(&self, data: &BookData) -> AppResult<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            author_id: data.author_id,
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
        };
        self.tables.write().await.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
