//! Authentication service.
//!
//! Logins check customer accounts first, then fall through to staff
//! accounts; a customer record with the wrong password does not block the
//! staff check. Both lookups go through the backend API; the storefront
//! keeps no account store of its own. The backend stores credentials in
//! the clear, so the comparison here is a plain string match.

mod error;

pub use error::AuthError;

use tower_sessions::Session;

use pocketwave_core::{Phone, PhoneError};

use crate::api::{BackendClient, Customer, Employee, NewCustomer};
use crate::models::{CUSTOMER_ROLE, session_keys};

/// Registration password bounds.
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_PASSWORD_LENGTH: usize = 100;

/// Registration name bound.
const MAX_NAME_LENGTH: usize = 100;

/// Role label stored for staff accounts with no role assigned.
const UNASSIGNED_STAFF_ROLE: &str = "Employee";

/// What a successful login produced, for the handler to turn into a
/// ticket cookie and a redirect.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Name for the greeting and the auth ticket.
    pub display_name: String,
    /// `Customer` or the staff role name.
    pub role: String,
    pub user_id: String,
    pub phone: String,
    /// Deep link stashed before the visitor was sent to the login page.
    /// Consumed by the login attempt whether or not it is honored.
    pub stashed_redirect: Option<String>,
}

impl LoginOutcome {
    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.role == CUSTOMER_ROLE
    }
}

/// Per-request login/registration flow over the backend API and session.
pub struct AuthFlow<'a> {
    api: &'a BackendClient,
    session: &'a Session,
}

impl<'a> AuthFlow<'a> {
    #[must_use]
    pub const fn new(api: &'a BackendClient, session: &'a Session) -> Self {
        Self { api, session }
    }

    /// Attempt a login with a raw phone number and password.
    ///
    /// Validation failures leave the session untouched, so a stashed deep
    /// link survives a retry. Once validation passes, any previous session
    /// state is cleared before the lookups run.
    ///
    /// # Errors
    ///
    /// `Validation` for malformed input, `InvalidCredentials` when neither
    /// account kind matches, `Api` when the backend cannot be reached or
    /// returns a malformed body.
    pub async fn login(&self, phone: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let phone = validate_phone(phone)?;
        if password.is_empty() {
            return Err(AuthError::Validation("Password is required.".to_string()));
        }

        // clear() wipes the stash, so it has to be read first
        let stashed_redirect = self.take_stashed_redirect().await;
        self.session.clear().await;

        if let Some(customer) = self.api.find_customer_by_phone(&phone).await? {
            if customer.password == password {
                self.write_customer(&customer).await;
                return Ok(LoginOutcome {
                    display_name: customer.full_name,
                    role: CUSTOMER_ROLE.to_string(),
                    user_id: customer.id.into(),
                    phone: customer.phone,
                    stashed_redirect,
                });
            }
        }

        if let Some(employee) = self.api.find_employee_by_phone(&phone).await? {
            if employee.password == password {
                let role = staff_role_label(&employee);
                self.write_employee(&employee, &role).await;
                return Ok(LoginOutcome {
                    display_name: employee.display_name(),
                    role,
                    user_id: employee.id.into(),
                    phone: employee.phone,
                    stashed_redirect,
                });
            }
        }

        Err(AuthError::InvalidCredentials)
    }

    /// Validate and submit a customer registration.
    ///
    /// # Errors
    ///
    /// `Validation` with a visitor-facing message for each broken rule,
    /// checked in form order; `Api` when the backend rejects the account
    /// (duplicate phone, server-side validation) or cannot be reached.
    pub async fn register(
        &self,
        full_name: &str,
        phone: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<(), AuthError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AuthError::Validation("Full name is required.".to_string()));
        }
        if full_name.chars().count() > MAX_NAME_LENGTH {
            return Err(AuthError::Validation(format!(
                "Full name must be at most {MAX_NAME_LENGTH} characters."
            )));
        }

        let phone = validate_phone(phone)?;

        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AuthError::Validation(
                "Enter a valid email address.".to_string(),
            ));
        }

        if password.len() < MIN_PASSWORD_LENGTH || password.len() > MAX_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters."
            )));
        }
        if password != password_confirm {
            return Err(AuthError::Validation(
                "Passwords do not match.".to_string(),
            ));
        }

        let new_customer = NewCustomer {
            full_name: full_name.to_string(),
            phone: phone.to_string(),
            email,
            password: password.to_string(),
        };
        self.api.create_customer(&new_customer).await?;

        tracing::info!(phone = %phone, "customer account created");
        Ok(())
    }

    async fn take_stashed_redirect(&self) -> Option<String> {
        self.session
            .get::<String>(session_keys::REDIRECT_AFTER_LOGIN)
            .await
            .ok()
            .flatten()
            .filter(|target| !target.is_empty())
    }

    async fn write_customer(&self, customer: &Customer) {
        self.insert(session_keys::ROLE, CUSTOMER_ROLE).await;
        self.insert(session_keys::DISPLAY_NAME, &customer.full_name)
            .await;
        self.insert(
            session_keys::AVATAR_URL,
            customer.avatar_url.as_deref().unwrap_or_default(),
        )
        .await;
        self.insert(session_keys::PHONE, &customer.phone).await;
        self.insert(session_keys::CUSTOMER_ID, customer.id.as_str())
            .await;
    }

    async fn write_employee(&self, employee: &Employee, role: &str) {
        self.insert(session_keys::ROLE, role).await;
        self.insert(session_keys::DISPLAY_NAME, &employee.display_name())
            .await;
        self.insert(
            session_keys::AVATAR_URL,
            employee.avatar_url.as_deref().unwrap_or_default(),
        )
        .await;
        self.insert(session_keys::PHONE, &employee.phone).await;
        self.insert(session_keys::EMPLOYEE_ID, employee.id.as_str())
            .await;
    }

    /// Identity writes degrade to a log line; a failed write shows up as a
    /// logged-out visitor, not a 500.
    async fn insert(&self, key: &str, value: &str) {
        if let Err(e) = self.session.insert(key, value).await {
            tracing::error!(key, error = %e, "failed to write identity to session");
        }
    }
}

/// Clear the server-side session.
///
/// Safe to call while signed out; logging out twice is a no-op that still
/// succeeds.
pub async fn logout(session: &Session) {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "failed to flush session on logout");
    }
}

fn validate_phone(raw: &str) -> Result<Phone, AuthError> {
    Phone::parse(raw.trim()).map_err(|e| {
        let message = match e {
            PhoneError::Empty => "Phone number is required.",
            _ => "Phone number must be 0 followed by 9 more digits.",
        };
        AuthError::Validation(message.to_string())
    })
}

/// Role label for the session and ticket. Staff rows sometimes carry no
/// role; an empty label would read as logged-out, so those get a neutral
/// one.
fn staff_role_label(employee: &Employee) -> String {
    employee
        .role
        .clone()
        .filter(|role| !role.trim().is_empty())
        .unwrap_or_else(|| UNASSIGNED_STAFF_ROLE.to_string())
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    // Simple validation: contains @, has content before and after @
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
