//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type
///
/// Validation failures and the delete dependency refusal are not errors:
/// handlers resolve them into a normal page. Everything here ends up on the
/// generic error page.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// A delete was refused because other rows still reference the target
    #[error("Still referenced: {0}")]
    Referenced(String),

    #[error("Store timed out: {0}")]
    Timeout(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Referenced(_) => StatusCode::CONFLICT,
            AppError::Database(_)
            | AppError::Template(_)
            | AppError::Timeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Referenced(msg) => {
                msg.clone()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {:?}", e);
                "Internal server error".to_string()
            }
            AppError::Timeout(msg) => {
                tracing::error!("Store timeout: {}", msg);
                "Database error".to_string()
            }
        };

        let body = format!(
            "<!DOCTYPE html>\n<html lang=\"en\"><head><title>{status}</title></head>\
             <body><h1>{message}</h1><h2>{status}</h2></body></html>\n",
            status = status,
            message = tera::escape_html(&message),
        );

        (status, Html(body)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
