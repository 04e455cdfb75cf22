//! Author service: lookups and mutations behind the author pages

use std::{sync::Arc, time::Duration};

use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorData, BookSummary},
    repository::CatalogStore,
};

/// An author joined with the books that reference it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorWithBooks {
    /// `None` when no author has the identifier
    pub author: Option<Author>,
    pub books: Vec<BookSummary>,
}

/// Result of a delete request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Author removed, or was already gone
    Deleted,
    /// Books still reference the author; nothing was removed
    HasBooks(AuthorWithBooks),
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
    lookup_timeout: Duration,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>, lookup_timeout: Duration) -> Self {
        Self {
            store,
            lookup_timeout,
        }
    }

    /// List authors by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.store.authors_list().await
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Author> {
        self.store
            .authors_get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    /// Fetch an author and its books concurrently.
    ///
    /// Fails if either fetch fails. An absent author is not a failure; the
    /// caller decides what that means.
    pub async fn lookup(&self, id: Uuid) -> AppResult<AuthorWithBooks> {
        let joined = async {
            tokio::try_join!(
                self.store.authors_get_by_id(id),
                self.store.books_by_author(id)
            )
        };

        let (author, books) = tokio::time::timeout(self.lookup_timeout, joined)
            .await
            .map_err(|_| AppError::Timeout(format!("author lookup {}", id)))??;

        Ok(AuthorWithBooks { author, books })
    }

    pub async fn create(&self, data: &AuthorData) -> AppResult<Author> {
        let author = self.store.authors_create(data).await?;
        tracing::info!("Author created: id={} name={:?}", author.id, author.name());
        Ok(author)
    }

    /// Replace all fields of an existing author
    pub async fn update(&self, id: Uuid, data: &AuthorData) -> AppResult<Author> {
        let author = self
            .store
            .authors_replace(id, data)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Author updated: id={}", id);
        Ok(author)
    }

    /// Delete an author unless books still reference it.
    ///
    /// Deleting an absent author succeeds, so repeating a delete is harmless.
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome> {
        let found = self.lookup(id).await?;
        if !found.books.is_empty() {
            tracing::info!(
                "Author delete refused: id={} still has {} book(s)",
                id,
                found.books.len()
            );
            return Ok(DeleteOutcome::HasBooks(found));
        }

        match self.store.authors_delete(id).await {
            Ok(Some(_)) => tracing::info!("Author deleted: id={}", id),
            Ok(None) => tracing::debug!("Author delete: id={} already absent", id),
            // A book was added after the lookup
            Err(AppError::Referenced(_)) => {
                let found = self.lookup(id).await?;
                tracing::info!("Author delete refused by store: id={}", id);
                return Ok(DeleteOutcome::HasBooks(found));
            }
            Err(e) => return Err(e),
        }
        Ok(DeleteOutcome::Deleted)
    }
}
