//! Integration tests for storefront sign-in and registration.
//!
//! These tests require:
//! - The storefront server running (cargo run -p pocketwave-storefront)
//! - Tests marked "and backend API" additionally need the CRUD API with
//!   its seed data reachable
//!
//! Run with: cargo test -p pocketwave-integration-tests -- --ignored

use pocketwave_integration_tests::{client, no_redirect_client, storefront_base_url};
use reqwest::StatusCode;
use reqwest::header::SET_COOKIE;

// ============================================================================
// Login Page Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_login_page_expires_the_auth_ticket() {
    let resp = client()
        .get(format!("{}/login", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get login page");

    assert_eq!(resp.status(), StatusCode::OK);

    // Arriving at the login page always discards any signed-in identity.
    let removal = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("pw_auth="));
    let removal = removal.expect("login page should expire the pw_auth cookie");
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_login_rejects_missing_phone() {
    let resp = client()
        .post(format!("{}/login", storefront_base_url()))
        .form(&[("phone", ""), ("password", "whatever")])
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Phone number is required."));
}

#[tokio::test]
#[ignore = "Requires running storefront and backend API"]
async fn test_login_rejects_unknown_account() {
    let resp = client()
        .post(format!("{}/login", storefront_base_url()))
        .form(&[("phone", "0999999999"), ("password", "not-a-password")])
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Invalid phone number or password"));
}

#[tokio::test]
#[ignore = "Requires running storefront and backend API with seed data"]
async fn test_login_issues_ticket_and_honors_stashed_redirect() {
    let base_url = storefront_base_url();
    let http = no_redirect_client();

    // Stash a deep link, then sign in with a seeded customer account.
    let page = http
        .get(format!("{base_url}/login?next=/cart"))
        .send()
        .await
        .expect("Failed to get login page");
    assert_eq!(page.status(), StatusCode::OK);

    let resp = http
        .post(format!("{base_url}/login"))
        .form(&[("phone", "0912345678"), ("password", "123456")])
        .send()
        .await
        .expect("Failed to post login");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|value| value.to_str().ok()),
        Some("/cart")
    );

    let ticket = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("pw_auth="))
        .expect("login should set the pw_auth ticket");
    assert!(ticket.contains("HttpOnly"));
    assert!(!ticket.contains("Max-Age=0"));
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_register_password_mismatch_keeps_typed_values() {
    let resp = client()
        .post(format!("{}/register", storefront_base_url()))
        .form(&[
            ("full_name", "Ana Tran"),
            ("phone", "0912345678"),
            ("email", "ana@example.com"),
            ("password", "hunter22"),
            ("password_confirm", "different"),
        ])
        .send()
        .await
        .expect("Failed to post registration");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Passwords do not match."));
    // Typed values survive the round trip; passwords never do.
    assert!(body.contains(r#"value="Ana Tran""#));
    assert!(body.contains(r#"value="ana@example.com""#));
    assert!(!body.contains("hunter22"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_register_rejects_malformed_phone() {
    let resp = client()
        .post(format!("{}/register", storefront_base_url()))
        .form(&[
            ("full_name", "Ana Tran"),
            ("phone", "12345"),
            ("email", "ana@example.com"),
            ("password", "hunter22"),
            ("password_confirm", "hunter22"),
        ])
        .send()
        .await
        .expect("Failed to post registration");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Phone number must be 0 followed by 9 more digits."));
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_logout_page_without_session() {
    let resp = client()
        .get(format!("{}/logout", storefront_base_url()))
        .send()
        .await
        .expect("Failed to get logout page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Not signed in"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_logout_action_is_idempotent() {
    let resp = no_redirect_client()
        .post(format!("{}/logout", storefront_base_url()))
        .send()
        .await
        .expect("Failed to post logout");

    // Works even with nobody signed in.
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers()
            .get("location")
            .and_then(|value| value.to_str().ok()),
        Some("/")
    );

    let removal = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("pw_auth="))
        .expect("logout should expire the pw_auth cookie");
    assert!(removal.contains("Max-Age=0"));
}
