//! Integration tests for Pocketwave.
//!
//! Every test under `tests/` drives a running storefront over HTTP;
//! nothing here spins one up. Start the stack first:
//!
//! ```bash
//! # Terminal 1: the backend CRUD API on port 5050
//! # Terminal 2: the storefront
//! cargo run -p pocketwave-storefront
//!
//! # Then:
//! cargo test -p pocketwave-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default so a plain `cargo test` stays green
//! without servers running.

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client with a cookie store, so the session survives across
/// requests the way a browser's would.
///
/// # Panics
///
/// Panics if the TLS backend fails to initialize.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Like [`client`], but never follows redirects, so tests can assert on
/// `Location` headers directly.
///
/// # Panics
///
/// Panics if the TLS backend fails to initialize.
#[must_use]
pub fn no_redirect_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
