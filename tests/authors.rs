//! Author pages driven through the router

mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use common::{app, get, post_form};
use locallibrary::{
    models::{AuthorData, BookData},
    repository::{memory::MemoryStore, CatalogStore},
};

fn jane() -> AuthorData {
    AuthorData {
        first_name: "Jane".to_string(),
        family_name: "Austen".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1775, 12, 16),
        date_of_death: NaiveDate::from_ymd_opt(1817, 7, 18),
        nationality: None,
    }
}

async fn add_book(store: &MemoryStore, author_id: Uuid, title: &str) {
    store
        .books_create(&BookData {
            title: title.to_string(),
            author_id,
            summary: "A summary".to_string(),
            isbn: "9780141439587".to_string(),
        })
        .await
        .unwrap();
}

fn id_from_location(location: &str) -> Uuid {
    let id = location
        .strip_prefix("/catalog/author/")
        .expect("redirects to the author page");
    Uuid::parse_str(id).unwrap()
}

#[tokio::test]
async fn test_nationality_at_the_limit_with_escapable_character() {
    let (app, store) = app();

    let page = post_form(
        &app,
        "/catalog/author/create",
        &format!("first_name=Jane&family_name=Austen&nationality={}%26", "a".repeat(99)),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let stored = store
        .authors_get_by_id(id_from_location(page.location()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.nationality, Some(format!("{}&amp;", "a".repeat(99))));
}

#[tokio::test]
async fn test_create_round_trip() {
    let (app, store) = app();

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=",
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let id = id_from_location(page.location());
    let stored = store.authors_get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Jane");
    assert_eq!(stored.family_name, "Austen");
    assert_eq!(stored.date_of_birth, NaiveDate::from_ymd_opt(1775, 12, 16));
    assert_eq!(stored.date_of_death, None);
    assert_eq!(stored.nationality, None);

    let detail = get(&app, page.location()).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Author: Austen, Jane"));
    assert!(detail.body.contains("Dec 16, 1775"));
    assert!(detail.body.contains("This author has no books."));
}

#[tokio::test]
async fn test_create_trims_fields() {
    let (app, store) = app();

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=++Jane+&family_name=Austen&nationality=+British+",
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);

    let stored = store
        .authors_get_by_id(id_from_location(page.location()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.first_name, "Jane");
    assert_eq!(stored.nationality.as_deref(), Some("British"));
}

#[tokio::test]
async fn test_create_with_blank_name_rerenders_form() {
    let (app, store) = app();

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=+++&family_name=+Austen+&date_of_birth=",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First name must be specified."));
    assert!(!page.body.contains("Invalid date of birth"));
    // Refilled with the sanitized value, not the raw one.
    assert!(page.body.contains(r#"value="Austen""#));
    assert_eq!(store.authors_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_with_bad_date_rerenders_form() {
    let (app, store) = app();

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=16%2F12%2F1775&date_of_death=1817-02-30",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Invalid date of birth"));
    assert!(page.body.contains("Invalid date of death"));
    assert_eq!(store.authors_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_form_is_blank() {
    let (app, _) = app();

    let page = get(&app, "/catalog/author/create").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<h1>Create Author</h1>"));
    assert!(page.body.contains(r#"name="first_name""#));
    assert!(!page.body.contains(r#"class="errors""#));
}

#[tokio::test]
async fn test_list_is_sorted() {
    let (app, store) = app();
    store.authors_create(&jane()).await.unwrap();
    store
        .authors_create(&AuthorData {
            first_name: "Isaac".to_string(),
            family_name: "Asimov".to_string(),
            ..AuthorData::default()
        })
        .await
        .unwrap();

    let page = get(&app, "/catalog/authors").await;
    assert_eq!(page.status, StatusCode::OK);
    let asimov = page.body.find("Asimov, Isaac").unwrap();
    let austen = page.body.find("Austen, Jane").unwrap();
    assert!(asimov < austen);
}

#[tokio::test]
async fn test_detail_of_absent_author_is_not_found() {
    let (app, _) = app();

    let page = get(&app, &format!("/catalog/author/{}", Uuid::new_v4())).await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    assert!(page.body.contains("Author not found"));
}

#[tokio::test]
async fn test_detail_lists_books_and_lifespan() {
    let (app, store) = app();
    let author = store.authors_create(&jane()).await.unwrap();
    add_book(&store, author.id, "Emma").await;

    let page = get(&app, &author.url()).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Emma"));
    assert!(page.body.contains("Lifespan: 42 years"));
}

#[tokio::test]
async fn test_update_replaces_fields() {
    let (app, store) = app();
    let author = store.authors_create(&jane()).await.unwrap();

    let form = get(&app, &format!("{}/update", author.url())).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains(r#"value="1775-12-16""#));

    let page = post_form(
        &app,
        &format!("{}/update", author.url()),
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=&nationality=English",
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location(), author.url());

    let stored = store.authors_get_by_id(author.id).await.unwrap().unwrap();
    assert_eq!(stored.date_of_death, None);
    assert_eq!(stored.nationality.as_deref(), Some("English"));
}

#[tokio::test]
async fn test_invalid_update_never_persists() {
    let (app, store) = app();
    let author = store.authors_create(&jane()).await.unwrap();

    let page = post_form(
        &app,
        &format!("{}/update", author.url()),
        "first_name=&family_name=Bront%C3%AB&date_of_birth=yesterday",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<h1>Update Author</h1>"));
    assert!(page.body.contains("First name must be specified."));
    assert!(page.body.contains("Invalid date of birth"));

    let stored = store.authors_get_by_id(author.id).await.unwrap().unwrap();
    assert_eq!(stored, author);
}

#[tokio::test]
async fn test_update_of_absent_author_is_not_found() {
    let (app, _) = app();
    let url = format!("/catalog/author/{}/update", Uuid::new_v4());

    assert_eq!(get(&app, &url).await.status, StatusCode::NOT_FOUND);
    let page = post_form(&app, &url, "first_name=Jane&family_name=Austen").await;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_confirmation() {
    let (app, store) = app();
    let author = store.authors_create(&jane()).await.unwrap();

    let page = get(&app, &format!("{}/delete", author.url())).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Do you really want to delete this Author?"));
    assert!(page.body.contains(&format!(r#"value="{}""#, author.id)));
}

#[tokio::test]
async fn test_delete_confirmation_for_absent_author_redirects() {
    let (app, _) = app();

    let page = get(&app, &format!("/catalog/author/{}/delete", Uuid::new_v4())).await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location(), "/catalog/authors");
}

#[tokio::test]
async fn test_delete_is_refused_while_books_exist() {
    let (app, store) = app();
    let author = store.authors_create(&jane()).await.unwrap();
    add_book(&store, author.id, "Persuasion").await;

    let page = post_form(
        &app,
        &format!("{}/delete", author.url()),
        &format!("authorid={}", author.id),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Delete the following books"));
    assert!(page.body.contains("Persuasion"));
    assert!(store.authors_get_by_id(author.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_twice_redirects_both_times() {
    let (app, store) = app();
    let author = store.authors_create(&jane()).await.unwrap();
    let url = format!("{}/delete", author.url());
    let body = format!("authorid={}", author.id);

    for _ in 0..2 {
        let page = post_form(&app, &url, &body).await;
        assert_eq!(page.status, StatusCode::SEE_OTHER);
        assert_eq!(page.location(), "/catalog/authors");
    }
    assert_eq!(store.authors_get_by_id(author.id).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_uses_identifier_from_body() {
    let (app, store) = app();
    let kept = store.authors_create(&jane()).await.unwrap();
    let removed = store
        .authors_create(&AuthorData {
            first_name: "Isaac".to_string(),
            family_name: "Asimov".to_string(),
            ..AuthorData::default()
        })
        .await
        .unwrap();

    let page = post_form(
        &app,
        &format!("{}/delete", kept.url()),
        &format!("authorid={}", removed.id),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert!(store.authors_get_by_id(kept.id).await.unwrap().is_some());
    assert_eq!(store.authors_get_by_id(removed.id).await.unwrap(), None);
}
