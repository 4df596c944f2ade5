//! Integration tests for public storefront pages.
//!
//! These tests require:
//! - The storefront server running (cargo run -p pocketwave-storefront)
//! - The backend CRUD API is optional; pages degrade to fallbacks
//!   without it
//!
//! Run with: cargo test -p pocketwave-integration-tests -- --ignored

use pocketwave_integration_tests::{client, storefront_base_url};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read body"), "ok");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_home_page_renders_grid_and_promo_strip() {
    let resp = client()
        .get(storefront_base_url())
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");

    assert!(body.contains("Featured handsets"));
    // Either live promotions or the static fallback; the strip is never
    // empty.
    assert!(body.contains("promo-strip"));
    assert!(body.contains("<li>"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_promotions_page_lists_campaigns() {
    let resp = client()
        .get(format!("{}/promotions", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get promotions page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");

    assert!(body.contains("Current promotions"));
    assert_eq!(body.matches("campaign-card").count(), 3);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_login_and_register_pages_render_forms() {
    let base_url = storefront_base_url();
    let http = client();

    let login = http
        .get(format!("{base_url}/login"))
        .send()
        .await
        .expect("Failed to get login page");
    assert_eq!(login.status(), StatusCode::OK);
    let body = login.text().await.expect("Failed to read body");
    assert!(body.contains(r#"name="phone""#));
    assert!(body.contains(r#"name="password""#));

    let register = http
        .get(format!("{base_url}/register"))
        .send()
        .await
        .expect("Failed to get register page");
    assert_eq!(register.status(), StatusCode::OK);
    let body = register.text().await.expect("Failed to read body");
    assert!(body.contains(r#"name="full_name""#));
    assert!(body.contains(r#"name="password_confirm""#));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_static_assets_served() {
    let resp = client()
        .get(format!("{}/static/css/main.css", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get stylesheet");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.text()
            .await
            .expect("Failed to read body")
            .contains(".site-header")
    );
}
