//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                - Home page (featured handsets + live promotions)
//! GET  /health          - Health check
//! GET  /promotions      - Promotions page (static campaigns)
//!
//! # Auth (rate limited per client IP)
//! GET  /login           - Login page (clears any signed-in identity, stashes ?next=)
//! POST /login           - Login action
//! GET  /register        - Registration page
//! POST /register        - Registration action
//! GET  /logout          - Logout confirmation page
//! POST /logout          - Logout action
//!
//! # Cart (mutations answer JSON, rate limited per client IP)
//! GET  /cart            - Cart page
//! POST /cart/update     - Update line quantity
//! POST /cart/remove     - Remove a line
//! POST /cart/checkout   - Clear the cart and hand off to payment
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod promotions;
pub mod register;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
///
/// The whole group shares one per-IP budget so credential stuffing cannot
/// bounce between login and registration to reset its counter.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route(
            "/register",
            get(register::register_page).post(register::register),
        )
        .route("/logout", get(auth::logout_page).post(auth::logout))
        .layer(auth_rate_limiter())
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
        .layer(api_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Promotions page
        .route("/promotions", get(promotions::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // Auth routes
        .merge(auth_routes())
}
