//! Catalog home page

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{error::AppResult, AppState};

/// Display site home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let counts = state.services.counts().await?;
    let page = state.templates.render(
        "index.html",
        &json!({
            "title": "Local Library Home",
            "author_count": counts.author_count,
            "book_count": counts.book_count,
        }),
    )?;
    Ok(page.into_response())
}
