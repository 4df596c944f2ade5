//! Cart persistence cookie.
//!
//! The cart outlives the 30-minute session in a cookie holding a
//! percent-encoded JSON array of line items. Storefront script writes the
//! same cookie when a visitor adds an item, so it is deliberately not
//! HttpOnly and the format is part of the page contract.

use axum::extract::FromRequestParts;
use axum::http::{HeaderName, header, request::Parts};
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use crate::middleware::request_cookie;
use crate::models::Cart;

/// Cart cookie name. Shared with the storefront script that writes it.
pub const CART_COOKIE_NAME: &str = "CartItems";

/// Cart cookie lifetime in seconds (7 days).
const CART_COOKIE_MAX_AGE_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Extractor for the cart cookie.
///
/// `None` when the cookie is missing or unparseable; a corrupt cookie
/// reads the same as no cookie.
pub struct CartCookie(pub Option<Cart>);

impl<S> FromRequestParts<S> for CartCookie
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cart = request_cookie(&parts.headers, CART_COOKIE_NAME)
            .and_then(|value| Cart::from_cookie_value(&value));
        Ok(Self(cart))
    }
}

/// Build the `Set-Cookie` pair that refreshes the cart cookie.
///
/// Handlers append this to every response that loaded or mutated the
/// cart, keeping the cookie copy in step with the session copy.
#[must_use]
pub fn cart_cookie_header(cart: &Cart, secure: bool) -> (HeaderName, String) {
    let cookie = Cookie::build((CART_COOKIE_NAME, cart.to_cookie_value()))
        .path("/")
        .max_age(Duration::seconds(CART_COOKIE_MAX_AGE_SECONDS))
        .same_site(SameSite::Strict)
        .http_only(false)
        .secure(secure)
        .build();

    (header::SET_COOKIE, cookie.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(cookie_header: Option<&str>) -> CartCookie {
        let mut builder = Request::builder().uri("/cart");
        if let Some(value) = cookie_header {
            builder = builder.header(header::COOKIE, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        CartCookie::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_extractor_missing_cookie() {
        let CartCookie(cart) = extract(None).await;
        assert!(cart.is_none());
    }

    #[tokio::test]
    async fn test_extractor_reads_cart_among_other_cookies() {
        let value = Cart::demo().to_cookie_value();
        let header_value = format!("pw_session=abc123; CartItems={value}; theme=dark");

        let CartCookie(cart) = extract(Some(&header_value)).await;
        assert_eq!(cart.unwrap(), Cart::demo());
    }

    #[tokio::test]
    async fn test_extractor_ignores_garbage() {
        let CartCookie(cart) = extract(Some("CartItems=%%%not-a-cart")).await;
        assert!(cart.is_none());
    }

    #[test]
    fn test_cart_cookie_header_attributes() {
        let (name, value) = cart_cookie_header(&Cart::demo(), false);

        assert_eq!(name, header::SET_COOKIE);
        assert!(value.starts_with("CartItems="));
        assert!(value.contains("Max-Age=604800"));
        assert!(value.contains("SameSite=Strict"));
        assert!(value.contains("Path=/"));
        // Script must be able to read and rewrite this cookie
        assert!(!value.contains("HttpOnly"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn test_cart_cookie_header_secure_flag() {
        let (_, value) = cart_cookie_header(&Cart::default(), true);
        assert!(value.contains("Secure"));
    }

    #[tokio::test]
    async fn test_header_round_trips_through_extractor() {
        let (_, set_cookie) = cart_cookie_header(&Cart::demo(), false);
        // First attribute pair is the cookie itself
        let pair = set_cookie.split(';').next().unwrap();

        let CartCookie(cart) = extract(Some(pair)).await;
        assert_eq!(cart.unwrap(), Cart::demo());
    }
}
