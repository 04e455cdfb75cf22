//! Repository layer for catalog storage
//!
//! Services only see [`CatalogStore`]. [`Repository`] backs it with
//! PostgreSQL; [`memory::MemoryStore`] keeps everything in process.

pub mod authors;
pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorData, Book, BookData, BookSummary},
};

/// Storage operations the catalog relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All authors sorted by family name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;

    async fn authors_count(&self) -> AppResult<i64>;

    /// Insert; the store assigns the identifier
    async fn authors_create(&self, data: &AuthorData) -> AppResult<Author>;

    /// Replace every field of an existing author; `None` when absent
    async fn authors_replace(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>>;

    /// Delete and return the removed author; `None` when absent
    async fn authors_delete(&self, id: Uuid) -> AppResult<Option<Author>>;

    /// Books referencing an author, projected to title and summary
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>>;

    /// All books sorted by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;

    async fn books_get_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;

    async fn books_count(&self) -> AppResult<i64>;

    async fn books_create(&self, data: &BookData) -> AppResult<Book>;

    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed store holding the connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn authors_get_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_get_by_id(id).await
    }

    async fn authors_count(&self) -> AppResult<i64> {
        self.authors_count().await
    }

    async fn authors_create(&self, data: &AuthorData) -> AppResult<Author> {
        self.authors_create(data).await
    }

    async fn authors_replace(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        self.authors_replace(id, data).await
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_delete(id).await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        self.books_by_author(author_id).await
    }

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        self.books_list().await
    }

    async fn books_get_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        self.books_get_by_id(id).await
    }

    async fn books_count(&self) -> AppResult<i64> {
        self.books_count().await
    }

    async fn books_create(&self, data: &BookData) -> AppResult<Book> {
        self.books_create(data).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
