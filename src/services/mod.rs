//! Business logic services

pub mod authors;
pub mod books;

use std::{sync::Arc, time::Duration};

use serde::Serialize;

use crate::{config::CatalogConfig, error::AppResult, repository::CatalogStore};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub author_count: i64,
    pub book_count: i64,
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    store: Arc<dyn CatalogStore>,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn CatalogStore>, config: &CatalogConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(
                store.clone(),
                Duration::from_millis(config.lookup_timeout_ms),
            ),
            books: books::BooksService::new(store.clone()),
            store,
        }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (author_count, book_count) =
            tokio::try_join!(self.store.authors_count(), self.store.books_count())?;
        Ok(CatalogCounts {
            author_count,
            book_count,
        })
    }

    /// Store round trip for the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
