//! Identity extractor for route handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tower_sessions::Session;

use crate::models::UserSession;

/// Extractor handing handlers the identity snapshot for the request.
///
/// Anonymous requests still succeed; the snapshot's `is_logged_in` tells
/// them apart. A missing session layer (misassembled router) reads as
/// anonymous rather than a 500.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentIdentity(user): CurrentIdentity) -> impl IntoResponse {
///     if user.is_logged_in() {
///         format!("Hello, {}!", user.display_name)
///     } else {
///         "Hello, guest!".to_string()
///     }
/// }
/// ```
pub struct CurrentIdentity(pub UserSession);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => UserSession::load(session).await,
            None => UserSession::default(),
        };

        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use tower_sessions::{MemoryStore, Session};

    use crate::models::session_keys;

    use super::*;

    #[tokio::test]
    async fn test_missing_session_layer_reads_as_anonymous() {
        let (mut parts, ()) = Request::builder().uri("/").body(()).unwrap().into_parts();

        let CurrentIdentity(user) = CurrentIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(!user.is_logged_in());
    }

    #[tokio::test]
    async fn test_loads_identity_from_session_extension() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session.insert(session_keys::ROLE, "Customer").await.unwrap();
        session
            .insert(session_keys::DISPLAY_NAME, "Alice Tran")
            .await
            .unwrap();

        let (mut parts, ()) = Request::builder().uri("/").body(()).unwrap().into_parts();
        parts.extensions.insert(session);

        let CurrentIdentity(user) = CurrentIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(user.is_customer());
        assert_eq!(user.display_name, "Alice Tran");
    }
}
