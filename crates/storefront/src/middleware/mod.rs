//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-memory store)
//! 4. Ticket renewal (sliding auth ticket cookie)
//! 5. Rate limiting (governor, per route group)

pub mod auth;
pub mod cart_cookie;
pub mod rate_limit;
pub mod session;
pub mod ticket;

pub use auth::CurrentIdentity;
pub use cart_cookie::{CartCookie, cart_cookie_header};
pub use rate_limit::{api_rate_limiter, auth_rate_limiter};
pub use session::create_session_layer;
pub use ticket::{AuthTicket, refresh_ticket, ticket_cookie, ticket_removal_cookie};

use axum::http::{HeaderMap, header};
use tower_sessions::cookie::Cookie;

/// Read one cookie's raw value from a request's `Cookie` headers.
pub(crate) fn request_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}
