//! Book pages

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AuthorView, BookDraft},
    validation::{FieldError, RawForm},
    AppState,
};

/// Display list of all books
pub async fn book_list(State(state): State<AppState>) -> AppResult<Response> {
    let book_list = state.services.books.list().await?;
    let page = state.templates.render(
        "book_list.html",
        &json!({ "title": "Book List", "book_list": book_list }),
    )?;
    Ok(page.into_response())
}

/// Display detail page for a specific book
pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let detail = state.services.books.detail(id).await?;
    let page = state.templates.render(
        "book_detail.html",
        &json!({
            "title": detail.book.title,
            "book": detail.book,
            "author": detail.author.as_ref().map(AuthorView::from),
        }),
    )?;
    Ok(page.into_response())
}

/// Display book create form
pub async fn book_create_get(State(state): State<AppState>) -> AppResult<Response> {
    render_form(&state, &BookDraft::default(), &[]).await
}

/// Handle book create form submission
pub async fn book_create_post(
    State(state): State<AppState>,
    Form(raw): Form<RawForm>,
) -> AppResult<Response> {
    let outcome = BookDraft::pipeline().run(&raw);
    let draft = BookDraft::from(&outcome);
    let data = match draft.to_data() {
        Some(data) if outcome.is_valid() => data,
        _ => {
            tracing::debug!("Book create rejected: {:?}", outcome.errors());
            return render_form(&state, &draft, outcome.errors()).await;
        }
    };

    match state.services.books.create(&data).await {
        Ok(book) => Ok(Redirect::to(&book.url()).into_response()),
        // The chosen author vanished between form display and submit.
        Err(AppError::BadRequest(msg)) => {
            let errors = [FieldError {
                field: "author",
                msg,
            }];
            render_form(&state, &draft, &errors).await
        }
        Err(e) => Err(e),
    }
}

/// The form needs every author for its select box
async fn render_form(
    state: &AppState,
    draft: &BookDraft,
    errors: &[FieldError],
) -> AppResult<Response> {
    let authors = state.services.authors.list().await?;
    let authors: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();
    let page = state.templates.render(
        "book_form.html",
        &json!({
            "title": "Create Book",
            "book": draft,
            "authors": authors,
            "errors": errors,
        }),
    )?;
    Ok(page.into_response())
}
