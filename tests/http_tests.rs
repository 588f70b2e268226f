//! Router-level tests driving the full HTTP surface (cookies, redirects,
//! rendered pages) against in-memory stores

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use biblio_server::{
    api,
    config::AppConfig,
    repository::{BookStore, InMemoryBookStore, InMemoryUserStore, Repository},
    services::Services,
    session::InMemorySessionStore,
    views::HtmlRenderer,
    AppState,
};

struct TestApp {
    router: Router,
    books: Arc<InMemoryBookStore>,
}

/// App over in-memory stores, seeded with the two-card-holder fixture:
/// book 1 on the shelf, book 2 out on card 1234.
async fn test_app() -> TestApp {
    let books = Arc::new(InMemoryBookStore::default());
    let users = Arc::new(InMemoryUserStore::default());

    users.insert("0000", "John").await;
    users.insert("1234", "Leah").await;
    books
        .insert("Paulo Coelho", "The Alchemist", "", "/images/TheAlchemist.jpg", "A fable.")
        .await;
    books
        .insert("Colleen Hoover", "Verity", "1234", "/images/Verity.jpg", "A thriller.")
        .await;

    let config = AppConfig::default();
    let services = Services::new(
        Repository::new(books.clone(), users),
        config.circulation.clone(),
    );
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        sessions: Arc::new(InMemorySessionStore::default()),
        renderer: Arc::new(HtmlRenderer),
    };

    TestApp {
        router: api::router(state),
        books,
    }
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post(uri: &str, cookie: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match form {
        Some(form) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// The session cookie from a Set-Cookie header, as a Cookie header value
fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn log_in(app: &TestApp, card_number: &str) -> String {
    let response = app
        .router
        .clone()
        .oneshot(post("/login", None, Some(&format!("cardNum={}", card_number))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response)
}

#[tokio::test]
async fn home_lists_the_catalog() {
    let app = test_app().await;

    let response = app.router.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("The Alchemist"));
    assert!(body.contains("Verity"));
    assert!(body.contains("Log in"));
}

#[tokio::test]
async fn empty_catalog_renders_error_view() {
    let books = Arc::new(InMemoryBookStore::default());
    let users = Arc::new(InMemoryUserStore::default());
    let config = AppConfig::default();
    let services = Services::new(Repository::new(books, users), config.circulation.clone());
    let router = api::router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        sessions: Arc::new(InMemorySessionStore::default()),
        renderer: Arc::new(HtmlRenderer),
    });

    let response = router.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("No more books available"));
}

#[tokio::test]
async fn borrow_requires_login() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post("/borrow/1", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("Please log in to borrow this book"));

    // No mutation happened
    let book = app.books.find(1).await.unwrap().unwrap();
    assert!(book.is_available());
}

#[tokio::test]
async fn profile_requires_login() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(get("/profile", None))
        .await
        .unwrap();
    assert!(body_text(response)
        .await
        .contains("Please log in to see your profile"));
}

#[tokio::test]
async fn login_rejects_unknown_card_number() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post("/login", None, Some("cardNum=9999")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Invalid Card Number"));
}

#[tokio::test]
async fn borrow_profile_return_round_trip() {
    let app = test_app().await;

    // Log in as John
    let cookie = log_in(&app, "0000").await;

    // Borrow book 1: redirect to the catalog, fields set together
    let response = app
        .router
        .clone()
        .oneshot(post("/borrow/1", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let book = app.books.find(1).await.unwrap().unwrap();
    assert!(book.is_borrowed);
    assert_eq!(book.borrow_by, "0000");

    // Profile shows exactly the borrowed book
    let response = app
        .router
        .clone()
        .oneshot(get("/profile", Some(&cookie)))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("The Alchemist"));
    assert!(!body.contains("Verity"));
    assert!(body.contains("Signed in as John"));

    // Return it: success page, fields cleared together
    let response = app
        .router
        .clone()
        .oneshot(post("/return/1", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("You have returned sucessfully"));

    let book = app.books.find(1).await.unwrap().unwrap();
    assert!(!book.is_borrowed);
    assert_eq!(book.borrow_by, "");
}

#[tokio::test]
async fn borrowed_book_cannot_be_borrowed_again() {
    let app = test_app().await;

    let cookie = log_in(&app, "0000").await;

    // Book 2 is already out on Leah's card
    let response = app
        .router
        .clone()
        .oneshot(post("/borrow/2", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("This book is already borrowed"));

    let book = app.books.find(2).await.unwrap().unwrap();
    assert_eq!(book.borrow_by, "1234");
}

#[tokio::test]
async fn borrow_unknown_book_renders_not_found_message() {
    let app = test_app().await;

    let cookie = log_in(&app, "0000").await;
    let response = app
        .router
        .clone()
        .oneshot(post("/borrow/99", Some(&cookie), None))
        .await
        .unwrap();
    assert!(body_text(response)
        .await
        .contains("This book is cannot be found"));
}

#[tokio::test]
async fn return_works_without_a_session() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post("/return/2", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("You have returned sucessfully"));

    assert!(app.books.find(2).await.unwrap().unwrap().is_available());
}

#[tokio::test]
async fn return_unknown_book_renders_not_found_message() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(post("/return/99", None, None))
        .await
        .unwrap();
    assert!(body_text(response)
        .await
        .contains("Something went wrong, this book cannot be found!"));
}

#[tokio::test]
async fn logout_destroys_the_session() {
    let app = test_app().await;

    let cookie = log_in(&app, "0000").await;

    let response = app
        .router
        .clone()
        .oneshot(post("/logout", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("logged out"));

    // The old cookie no longer resolves to an authenticated session
    let response = app
        .router
        .clone()
        .oneshot(get("/", Some(&cookie)))
        .await
        .unwrap();
    assert!(!body_text(response).await.contains("Signed in as"));
}

#[tokio::test]
async fn forged_session_cookie_is_ignored() {
    let app = test_app().await;

    let cookie = "biblio_sid=11111111-1111-1111-1111-111111111111.deadbeef";
    let response = app
        .router
        .clone()
        .oneshot(get("/profile", Some(cookie)))
        .await
        .unwrap();
    assert!(body_text(response)
        .await
        .contains("Please log in to see your profile"));
}
