//! Identity state stored in the server-side session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Role string stored for customer logins. Employees store their staff
/// role name instead.
pub const CUSTOMER_ROLE: &str = "Customer";

/// Keys under which identity and cart state live in the session.
pub mod keys {
    pub const ROLE: &str = "role";
    pub const DISPLAY_NAME: &str = "display_name";
    pub const AVATAR_URL: &str = "avatar_url";
    pub const PHONE: &str = "phone";
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const EMPLOYEE_ID: &str = "employee_id";
    pub const CART: &str = "cart_items";
    pub const REDIRECT_AFTER_LOGIN: &str = "redirect_after_login";
}

/// Snapshot of the signed-in identity, as the layout and handlers see it.
///
/// Anonymous visitors get a default snapshot with every field empty; there
/// is no `Option` at the call sites, just `is_logged_in`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSession {
    pub role: String,
    pub display_name: String,
    pub avatar_url: String,
    pub phone: String,
    /// Customer id or employee id, whichever is set.
    pub user_id: String,
}

impl UserSession {
    /// Assemble a snapshot from the individual session keys.
    ///
    /// Unreadable keys count as absent, so a half-written session reads as
    /// a partially anonymous one rather than an error.
    pub async fn load(session: &Session) -> Self {
        let customer_id = read_key(session, keys::CUSTOMER_ID).await;
        let user_id = match customer_id {
            Some(id) => id,
            None => read_key(session, keys::EMPLOYEE_ID).await.unwrap_or_default(),
        };

        Self {
            role: read_key(session, keys::ROLE).await.unwrap_or_default(),
            display_name: read_key(session, keys::DISPLAY_NAME).await.unwrap_or_default(),
            avatar_url: read_key(session, keys::AVATAR_URL).await.unwrap_or_default(),
            phone: read_key(session, keys::PHONE).await.unwrap_or_default(),
            user_id,
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        !self.role.is_empty()
    }

    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.role == CUSTOMER_ROLE
    }

    #[must_use]
    pub fn is_employee(&self) -> bool {
        self.is_logged_in() && !self.is_customer()
    }
}

async fn read_key(session: &Session, key: &str) -> Option<String> {
    session.get::<String>(key).await.ok().flatten()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;

    fn fresh_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_load_empty_session_is_anonymous() {
        let session = fresh_session();
        let user = UserSession::load(&session).await;

        assert!(!user.is_logged_in());
        assert!(!user.is_customer());
        assert!(!user.is_employee());
        assert_eq!(user.display_name, "");
        assert_eq!(user.user_id, "");
    }

    #[tokio::test]
    async fn test_load_customer_session() {
        let session = fresh_session();
        session.insert(keys::ROLE, CUSTOMER_ROLE).await.unwrap();
        session.insert(keys::DISPLAY_NAME, "Alice Tran").await.unwrap();
        session.insert(keys::PHONE, "0912345678").await.unwrap();
        session.insert(keys::CUSTOMER_ID, "KH001").await.unwrap();

        let user = UserSession::load(&session).await;
        assert!(user.is_logged_in());
        assert!(user.is_customer());
        assert!(!user.is_employee());
        assert_eq!(user.user_id, "KH001");
        assert_eq!(user.display_name, "Alice Tran");
    }

    #[tokio::test]
    async fn test_load_employee_session() {
        let session = fresh_session();
        session.insert(keys::ROLE, "Administrator").await.unwrap();
        session.insert(keys::DISPLAY_NAME, "Binh Pham").await.unwrap();
        session.insert(keys::EMPLOYEE_ID, "NV001").await.unwrap();

        let user = UserSession::load(&session).await;
        assert!(user.is_employee());
        assert!(!user.is_customer());
        assert_eq!(user.user_id, "NV001");
    }

    #[tokio::test]
    async fn test_customer_id_wins_over_employee_id() {
        // Should never happen after a clean login, but the customer id is
        // the one the cart flow depends on
        let session = fresh_session();
        session.insert(keys::CUSTOMER_ID, "KH007").await.unwrap();
        session.insert(keys::EMPLOYEE_ID, "NV007").await.unwrap();

        let user = UserSession::load(&session).await;
        assert_eq!(user.user_id, "KH007");
    }
}
