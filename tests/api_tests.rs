//! Smoke tests against a running server
//!
//! These need a server on localhost:8080 with a freshly seeded database.

use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_home_page() {
    let client = Client::new();

    let response = client
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Catalog"));
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_card() {
    let client = Client::new();

    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("cardNum", "9999")])
        .send()
        .await
        .expect("Failed to send request");

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Invalid Card Number"));
}

#[tokio::test]
#[ignore]
async fn test_login_with_seeded_card() {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to build client");

    // Follows the redirect back to the catalog with the session cookie set
    let response = client
        .post(format!("{}/login", BASE_URL))
        .form(&[("cardNum", "0000")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Signed in as John"));
}
