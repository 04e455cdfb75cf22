//! Author pages: list, detail and the create/update/delete forms

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{author::DeleteAuthor, AuthorData, AuthorView, BookView},
    services::authors::{AuthorWithBooks, DeleteOutcome},
    validation::{FieldError, RawForm},
    AppState,
};

const AUTHOR_LIST_URL: &str = "/catalog/authors";

/// Display list of all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Response> {
    let authors = state.services.authors.list().await?;
    let author_list: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();
    let page = state.templates.render(
        "author_list.html",
        &json!({ "title": "Author List", "author_list": author_list }),
    )?;
    Ok(page.into_response())
}

/// Display detail page for a specific author
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let found = state.services.authors.lookup(id).await?;
    let author = found
        .author
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
    let page = state.templates.render(
        "author_detail.html",
        &json!({
            "title": "Author Detail",
            "author": AuthorView::from(author),
            "author_books": book_views(&found),
        }),
    )?;
    Ok(page.into_response())
}

/// Display author create form
pub async fn author_create_get(State(state): State<AppState>) -> AppResult<Response> {
    render_form(&state, "Create Author", None, &[])
}

/// Handle author create form submission
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(raw): Form<RawForm>,
) -> AppResult<Response> {
    let outcome = AuthorData::pipeline().run(&raw);
    let data = AuthorData::from(&outcome);
    if !outcome.is_valid() {
        tracing::debug!("Author create rejected: {:?}", outcome.errors());
        return render_form(&state, "Create Author", Some(AuthorView::from(&data)), outcome.errors());
    }

    let author = state.services.authors.create(&data).await?;
    Ok(Redirect::to(&author.url()).into_response())
}

/// Display author update form
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let author = state.services.authors.get_by_id(id).await?;
    render_form(&state, "Update Author", Some(AuthorView::from(&author)), &[])
}

/// Handle author update form submission
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(raw): Form<RawForm>,
) -> AppResult<Response> {
    let outcome = AuthorData::pipeline().run(&raw);
    let data = AuthorData::from(&outcome);
    if !outcome.is_valid() {
        tracing::debug!("Author update rejected: id={} {:?}", id, outcome.errors());
        let mut draft = AuthorView::from(&data);
        draft.id = Some(id);
        return render_form(&state, "Update Author", Some(draft), outcome.errors());
    }

    let author = state.services.authors.update(id, &data).await?;
    Ok(Redirect::to(&author.url()).into_response())
}

/// Display author delete confirmation
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let found = state.services.authors.lookup(id).await?;
    if found.author.is_none() {
        return Ok(Redirect::to(AUTHOR_LIST_URL).into_response());
    }
    render_delete(&state, &found)
}

/// Handle author delete; the identifier is taken from the form body
pub async fn author_delete_post(
    State(state): State<AppState>,
    Form(form): Form<DeleteAuthor>,
) -> AppResult<Response> {
    match state.services.authors.delete(form.authorid).await? {
        DeleteOutcome::Deleted => Ok(Redirect::to(AUTHOR_LIST_URL).into_response()),
        DeleteOutcome::HasBooks(found) => render_delete(&state, &found),
    }
}

fn book_views(found: &AuthorWithBooks) -> Vec<BookView> {
    found.books.iter().map(BookView::from).collect()
}

fn render_form(
    state: &AppState,
    title: &str,
    author: Option<AuthorView>,
    errors: &[FieldError],
) -> AppResult<Response> {
    let page = state.templates.render(
        "author_form.html",
        &json!({ "title": title, "author": author, "errors": errors }),
    )?;
    Ok(page.into_response())
}

fn render_delete(state: &AppState, found: &AuthorWithBooks) -> AppResult<Response> {
    let page = state.templates.render(
        "author_delete.html",
        &json!({
            "title": "Delete Author",
            "author": found.author.as_ref().map(AuthorView::from),
            "author_books": book_views(found),
        }),
    )?;
    Ok(page.into_response())
}
