//! Cart route handlers.
//!
//! The cart page renders server-side; mutations are called from a small
//! client script and answer JSON. Every response that changes the cart
//! also rewrites the `CartItems` mirror cookie so the cart survives the
//! session going away.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::{CartCookie, CurrentIdentity, cart_cookie_header};
use crate::models::{Cart, CartItem, UserSession};
use crate::services::cart::{CartError, CartStore, PAYMENT_REDIRECT};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub variant_id: String,
    pub name: String,
    pub quantity: i32,
    /// Unit price in minor units, rendered through the `money` filter.
    pub unit_price: i64,
    pub line_total: i64,
    pub image_url: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: i64,
    pub item_count: i32,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            variant_id: item.variant_id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total(),
            image_url: item.image_url.clone(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.total_price(),
            item_count: cart.total_quantity(),
        }
    }
}

// =============================================================================
// Form and Response Types
// =============================================================================

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub variant_id: String,
    pub quantity: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub variant_id: String,
}

/// Checkout form data.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    pub payment_method: Option<String>,
}

/// JSON answer for cart mutations.
///
/// Failures still answer 200; the client script branches on `success`
/// and follows `redirect` when present.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl ActionResponse {
    fn succeeded(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            redirect: None,
        }
    }

    fn failed(error: &CartError) -> Self {
        Self {
            success: false,
            message: Some(error.to_string()),
            // An anonymous checkout is recoverable: sign in and retry.
            redirect: matches!(error, CartError::NotAuthenticated)
                .then(|| "/login".to_string()),
        }
    }
}

/// Attach the refreshed mirror cookie to a JSON answer.
fn with_cart_cookie(state: &AppState, cart: &Cart, body: ActionResponse) -> Response {
    (
        AppendHeaders([cart_cookie_header(cart, state.config().is_secure())]),
        Json(body),
    )
        .into_response()
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub user: UserSession,
    pub cart: CartView,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the cart page.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    CurrentIdentity(user): CurrentIdentity,
    session: Session,
    CartCookie(cookie_cart): CartCookie,
) -> impl IntoResponse {
    let cart = CartStore::new(&session).load(cookie_cart).await;

    (
        AppendHeaders([cart_cookie_header(&cart, state.config().is_secure())]),
        CartShowTemplate {
            user,
            cart: CartView::from(&cart),
        },
    )
}

/// Update a line's quantity.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    CartCookie(cookie_cart): CartCookie,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    add_breadcrumb(
        "cart",
        "Update quantity",
        Some(&[("variant_id", form.variant_id.as_str())]),
    );

    match CartStore::new(&session)
        .update_quantity(cookie_cart, form.variant_id.trim(), form.quantity)
        .await
    {
        Ok(cart) => with_cart_cookie(&state, &cart, ActionResponse::succeeded("Quantity updated.")),
        Err(e) => Json(ActionResponse::failed(&e)).into_response(),
    }
}

/// Remove a line from the cart.
#[instrument(skip_all)]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    CartCookie(cookie_cart): CartCookie,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    add_breadcrumb(
        "cart",
        "Remove line",
        Some(&[("variant_id", form.variant_id.as_str())]),
    );

    match CartStore::new(&session)
        .remove(cookie_cart, form.variant_id.trim())
        .await
    {
        Ok(cart) => with_cart_cookie(&state, &cart, ActionResponse::succeeded("Item removed.")),
        Err(e) => Json(ActionResponse::failed(&e)).into_response(),
    }
}

/// Accept the order and hand off to payment.
///
/// Requires a signed-in customer and a non-empty cart. On success the
/// cart is cleared and the client is told where to go next.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    CartCookie(cookie_cart): CartCookie,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let payment_method = form.payment_method.as_deref().unwrap_or("unspecified");
    add_breadcrumb(
        "cart",
        "Checkout",
        Some(&[("payment_method", payment_method)]),
    );

    match CartStore::new(&session)
        .checkout(cookie_cart, payment_method)
        .await
    {
        Ok(cart) => with_cart_cookie(
            &state,
            &cart,
            ActionResponse {
                success: true,
                message: Some("Order received. Redirecting to payment.".to_string()),
                redirect: Some(PAYMENT_REDIRECT.to_string()),
            },
        ),
        Err(e) => Json(ActionResponse::failed(&e)).into_response(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_action_response_succeeded_omits_redirect() {
        let json = serde_json::to_string(&ActionResponse::succeeded("Quantity updated.")).unwrap();
        assert_eq!(json, r#"{"success":true,"message":"Quantity updated."}"#);
    }

    #[test]
    fn test_action_response_failed_carries_message() {
        let json =
            serde_json::to_string(&ActionResponse::failed(&CartError::EmptyCart)).unwrap();
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains(r#""message""#));
        assert!(!json.contains("redirect"));
    }

    #[test]
    fn test_action_response_sends_anonymous_checkout_to_login() {
        let response = ActionResponse::failed(&CartError::NotAuthenticated);
        assert_eq!(response.redirect.as_deref(), Some("/login"));
    }

    #[test]
    fn test_cart_view_totals() {
        let view = CartView::from(&Cart::demo());
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.subtotal, 597_000);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.items[1].line_total, 398_000);
    }

    #[test]
    fn test_cart_view_of_empty_cart() {
        let view = CartView::from(&Cart::default());
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, 0);
        assert_eq!(view.item_count, 0);
    }
}
