//! Local Library
//!
//! A library catalog web application: server-rendered HTML pages for
//! browsing authors and books, with form-driven create, update and delete.

use std::sync::Arc;

use axum::{
    response::Redirect,
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
    pub templates: render::Templates,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn repository::CatalogStore>,
        templates: render::Templates,
    ) -> Self {
        let services = services::Services::new(store, &config.catalog);
        Self {
            services: Arc::new(services),
            templates,
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(api::catalog::index))
        // Authors
        .route("/authors", get(api::authors::author_list))
        .route(
            "/author/create",
            get(api::authors::author_create_get).post(api::authors::author_create_post),
        )
        .route("/author/:id", get(api::authors::author_detail))
        .route(
            "/author/:id/update",
            get(api::authors::author_update_get).post(api::authors::author_update_post),
        )
        .route(
            "/author/:id/delete",
            get(api::authors::author_delete_get).post(api::authors::author_delete_post),
        )
        // Books
        .route("/books", get(api::books::book_list))
        .route(
            "/book/create",
            get(api::books::book_create_get).post(api::books::book_create_post),
        )
        .route("/book/:id", get(api::books::book_detail));

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
