//! Authentication route handlers.
//!
//! One login form serves both customers and staff; the role that comes
//! back decides the landing page. Visiting the login page always discards
//! any existing identity first.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use pocketwave_core::StaffRole;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{AuthTicket, CurrentIdentity, ticket_cookie, ticket_removal_cookie};
use crate::models::{UserSession, session_keys};
use crate::services::auth::{AuthError, AuthFlow, LoginOutcome};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Path to return to after a successful sign-in.
    pub next: Option<String>,
    /// Set by the registration flow to show a success note.
    pub created: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub user: UserSession,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Logout confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/logout.html")]
pub struct LogoutTemplate {
    pub user: UserSession,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Only same-site paths may be stashed as a post-login redirect.
/// `//host` is how protocol-relative URLs smuggle a foreign destination.
fn is_safe_redirect(next: &str) -> bool {
    next.starts_with('/') && !next.starts_with("//")
}

/// Where a fresh sign-in lands when no redirect was stashed.
fn landing_route(outcome: &LoginOutcome) -> &'static str {
    if outcome.is_customer() {
        return "/";
    }
    outcome
        .role
        .parse::<StaffRole>()
        .map_or("/", |role| match role {
            StaffRole::StaffManager => "/admin/staff",
            StaffRole::InventoryManager => "/admin/inventory",
            StaffRole::CatalogManager => "/admin/catalog",
            StaffRole::OrderManager => "/admin/orders",
            StaffRole::Administrator => "/admin",
        })
}

/// Display the login page.
///
/// Any signed-in identity is dropped on arrival, so the page can be used
/// to switch accounts. A `?next=` deep link is stashed in the fresh
/// session for the login action to consume.
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    session.clear().await;

    if let Some(next) = query.next.as_deref().filter(|next| is_safe_redirect(next)) {
        if let Err(e) = session
            .insert(session_keys::REDIRECT_AFTER_LOGIN, next.to_string())
            .await
        {
            tracing::error!("Failed to stash login redirect: {e}");
        }
    }

    let success = query
        .created
        .is_some()
        .then(|| "Account created. Sign in to continue.".to_string());

    (
        AppendHeaders([ticket_removal_cookie(state.config().is_secure())]),
        LoginTemplate {
            user: UserSession::default(),
            error: None,
            success,
        },
    )
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match AuthFlow::new(state.api(), &session)
        .login(&form.phone, &form.password)
        .await
    {
        Ok(outcome) => {
            set_sentry_user(&outcome.user_id, Some(&outcome.display_name));
            tracing::info!(role = %outcome.role, "Login succeeded");

            let ticket = AuthTicket::new(
                outcome.user_id.clone(),
                outcome.display_name.clone(),
                outcome.role.clone(),
                outcome.phone.clone(),
            );
            let cookie = ticket_cookie(
                &ticket.encode(&state.config().ticket_secret),
                state.config().is_secure(),
            );

            let target = outcome
                .stashed_redirect
                .clone()
                .unwrap_or_else(|| landing_route(&outcome).to_string());

            (AppendHeaders([cookie]), Redirect::to(&target)).into_response()
        }
        Err(AuthError::Validation(message)) => login_error(message),
        Err(AuthError::InvalidCredentials) => {
            login_error("Invalid phone number or password.".to_string())
        }
        Err(AuthError::Api(e)) => {
            tracing::error!("Login failed against backend: {e}");
            login_error("Sign-in is temporarily unavailable. Please try again.".to_string())
        }
    }
}

fn login_error(message: String) -> Response {
    LoginTemplate {
        user: UserSession::default(),
        error: Some(message),
        success: None,
    }
    .into_response()
}

// =============================================================================
// Logout Routes
// =============================================================================

/// Display the logout confirmation page.
pub async fn logout_page(CurrentIdentity(user): CurrentIdentity) -> impl IntoResponse {
    LogoutTemplate { user }
}

/// Handle logout.
///
/// Destroys the session and expires the auth ticket cookie. Safe to call
/// when nobody is signed in.
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    crate::services::auth::logout(&session).await;
    clear_sentry_user();

    (
        AppendHeaders([ticket_removal_cookie(state.config().is_secure())]),
        Redirect::to("/"),
    )
        .into_response()
}
