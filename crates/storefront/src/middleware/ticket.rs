//! Signed auth ticket cookie.
//!
//! Alongside the session, a successful login issues a compact signed
//! ticket: base64 JSON claims, a dot, and a hex HMAC-SHA256 signature.
//! The ticket slides: any request carrying a valid one gets a re-issued
//! copy with a fresh hour of life. Logout removes it, as does the login
//! page when it force-clears identity. The session stays the arbiter of
//! who is signed in; the ticket exists for consumers that outlive it.

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue, header};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use crate::middleware::request_cookie;
use crate::state::AppState;

/// Auth ticket cookie name.
pub const TICKET_COOKIE_NAME: &str = "pw_auth";

/// Ticket lifetime in seconds (1 hour), restarted on every carried request.
const TICKET_TTL_SECONDS: i64 = 60 * 60;

/// Claims carried by the auth ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTicket {
    pub user_id: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    /// Unix timestamp after which the ticket is dead.
    pub expires_at: i64,
}

impl AuthTicket {
    /// New ticket expiring one hour from now.
    #[must_use]
    pub fn new(user_id: String, name: String, role: String, phone: String) -> Self {
        Self {
            user_id,
            name,
            role,
            phone,
            expires_at: Utc::now().timestamp() + TICKET_TTL_SECONDS,
        }
    }

    /// Serialize and sign: `base64(claims) "." hex(hmac)`.
    #[must_use]
    pub fn encode(&self, secret: &SecretString) -> String {
        // A struct of strings and an i64 cannot fail to serialize
        let claims = serde_json::to_vec(self).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(claims);
        let signature = sign(secret, &payload);
        format!("{payload}.{signature}")
    }

    /// Verify signature and expiry, returning the claims when both hold.
    #[must_use]
    pub fn decode(raw: &str, secret: &SecretString) -> Option<Self> {
        let (payload, signature) = raw.split_once('.')?;

        let expected = sign(secret, payload);
        if expected.is_empty() || !constant_time_compare(signature, &expected) {
            return None;
        }

        let claims = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let ticket: Self = serde_json::from_slice(&claims).ok()?;
        (ticket.expires_at > Utc::now().timestamp()).then_some(ticket)
    }
}

/// HMAC-SHA256 over the payload, hex-encoded.
fn sign(secret: &SecretString, payload: &str) -> String {
    // HMAC accepts keys of any length, so this cannot fail in practice
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(secret.expose_secret().as_bytes()) else {
        return String::new();
    };
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// `Set-Cookie` pair carrying an encoded ticket.
#[must_use]
pub fn ticket_cookie(encoded: &str, secure: bool) -> (HeaderName, String) {
    let cookie = Cookie::build((TICKET_COOKIE_NAME, encoded.to_string()))
        .path("/")
        .max_age(Duration::seconds(TICKET_TTL_SECONDS))
        .same_site(SameSite::Strict)
        .http_only(true)
        .secure(secure)
        .build();

    (header::SET_COOKIE, cookie.to_string())
}

/// `Set-Cookie` pair that deletes the ticket.
#[must_use]
pub fn ticket_removal_cookie(secure: bool) -> (HeaderName, String) {
    let cookie = Cookie::build((TICKET_COOKIE_NAME, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .same_site(SameSite::Strict)
        .http_only(true)
        .secure(secure)
        .build();

    (header::SET_COOKIE, cookie.to_string())
}

/// Sliding renewal: re-issue a valid inbound ticket with a fresh expiry.
///
/// Requests without a valid ticket pass through untouched, and a handler
/// that already set its own `pw_auth` cookie (login, logout) wins over
/// the renewal.
pub async fn refresh_ticket(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let inbound = request_cookie(request.headers(), TICKET_COOKIE_NAME)
        .and_then(|raw| AuthTicket::decode(&raw, &state.config().ticket_secret));

    let mut response = next.run(request).await;

    if let Some(ticket) = inbound {
        let handler_set_ticket = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| value.starts_with(TICKET_COOKIE_NAME));
        if handler_set_ticket {
            return response;
        }

        let renewed = AuthTicket::new(ticket.user_id, ticket.name, ticket.role, ticket.phone);
        let (name, value) = ticket_cookie(
            &renewed.encode(&state.config().ticket_secret),
            state.config().is_secure(),
        );
        if let Ok(header_value) = HeaderValue::from_str(&value) {
            response.headers_mut().append(name, header_value);
        }
    }

    response
}
