//! Registration route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::ApiError;
use crate::filters;
use crate::models::UserSession;
use crate::services::auth::{AuthError, AuthFlow};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Registration page template.
///
/// Failed submissions re-render with the typed values so the visitor only
/// has to re-enter the passwords.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub user: UserSession,
    pub error: Option<String>,
    pub full_name: String,
    pub phone: String,
    pub email: String,
}

impl RegisterTemplate {
    fn blank() -> Self {
        Self {
            user: UserSession::default(),
            error: None,
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
        }
    }

    fn with_error(form: &RegisterForm, error: String) -> Self {
        Self {
            user: UserSession::default(),
            error: Some(error),
            full_name: form.full_name.clone(),
            phone: form.phone.clone(),
            email: form.email.clone(),
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate::blank()
}

/// Handle registration form submission.
///
/// On success the visitor is sent to the login page to sign in with the
/// new account.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    match AuthFlow::new(state.api(), &session)
        .register(
            &form.full_name,
            &form.phone,
            &form.email,
            &form.password,
            &form.password_confirm,
        )
        .await
    {
        Ok(()) => Redirect::to("/login?created=1").into_response(),
        Err(error) => RegisterTemplate::with_error(&form, register_error_message(&error))
            .into_response(),
    }
}

/// Map a registration failure to copy the visitor can act on.
fn register_error_message(error: &AuthError) -> String {
    match error {
        AuthError::Validation(message) => message.clone(),
        // The backend explains duplicates itself ("Phone number already
        // registered"), so its message is shown as-is.
        AuthError::Api(ApiError::Api { message, .. }) => message.clone(),
        AuthError::Api(e) => {
            tracing::error!("Registration failed against backend: {e}");
            "Registration is temporarily unavailable. Please try again.".to_string()
        }
        AuthError::InvalidCredentials => {
            "Invalid phone number or password.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            full_name: "Ana Tran".to_string(),
            phone: "0912345678".to_string(),
            email: "ana@example.com".to_string(),
            password: "hunter22".to_string(),
            password_confirm: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_register_error_message_passes_validation_through() {
        let message =
            register_error_message(&AuthError::Validation("Phone number is required.".into()));
        assert_eq!(message, "Phone number is required.");
    }

    #[test]
    fn test_register_error_message_shows_backend_rejection() {
        let error = AuthError::Api(ApiError::Api {
            status: 409,
            message: "Phone number already registered".to_string(),
        });
        assert_eq!(
            register_error_message(&error),
            "Phone number already registered"
        );
    }

    #[test]
    fn test_register_error_message_hides_transport_failures() {
        let error = AuthError::Api(ApiError::Parse("unexpected body".to_string()));
        assert!(register_error_message(&error).contains("temporarily unavailable"));
    }

    #[test]
    fn test_with_error_keeps_typed_values_but_never_passwords() {
        let template = RegisterTemplate::with_error(&form(), "nope".to_string());
        assert_eq!(template.full_name, "Ana Tran");
        assert_eq!(template.phone, "0912345678");
        assert_eq!(template.email, "ana@example.com");
        assert_eq!(template.error.as_deref(), Some("nope"));
    }
}
