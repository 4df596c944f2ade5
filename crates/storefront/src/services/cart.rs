//! Cart operations over the session-backed cart.
//!
//! Line items are added by storefront script writing the persistence
//! cookie directly; the server only ever loads, mutates, and clears. Every
//! mutation is dual-written: the session copy is saved here, the cookie
//! copy by the handler emitting a fresh `Set-Cookie` from the returned
//! cart. There is no transactional guarantee between the two; reads always
//! prefer the session.

use thiserror::Error;
use tower_sessions::Session;

use crate::models::{Cart, session_keys};

/// Where the browser is sent after a successful checkout.
pub const PAYMENT_REDIRECT: &str = "/orders/payment";

/// Errors from cart mutations. Each maps to a JSON `{ success: false }`
/// payload, not an error page.
#[derive(Debug, Error)]
pub enum CartError {
    /// Blank variant id or a quantity below 1.
    #[error("a line item id and a quantity of at least 1 are required")]
    InvalidInput,

    /// The cart holds no line for this variant.
    #[error("no cart line for variant {0}")]
    NotFound(String),

    /// Checkout with nothing in the cart.
    #[error("the cart is empty")]
    EmptyCart,

    /// Checkout without a signed-in customer.
    #[error("sign in required before placing an order")]
    NotAuthenticated,
}

/// Per-request cart accessor wrapping the tower session.
pub struct CartStore<'a> {
    session: &'a Session,
}

impl<'a> CartStore<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Load the cart for a page view.
    ///
    /// Precedence: session cart, then cookie cart, then the demo seed when
    /// both are empty or absent. The result is always re-persisted to the
    /// session so a cookie-restored or seeded cart survives the next
    /// request on its own.
    pub async fn load(&self, cookie_cart: Option<Cart>) -> Cart {
        let cart = match self.read_session_cart().await {
            Some(stored) if !stored.is_empty() => stored,
            Some(_) => Cart::demo(),
            None => match cookie_cart {
                Some(saved) if !saved.is_empty() => saved,
                _ => Cart::demo(),
            },
        };
        self.save(&cart).await;
        cart
    }

    /// Change the quantity of an existing line.
    ///
    /// Returns the updated cart so the caller can refresh the cookie copy.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank id or quantity below 1, `NotFound` when
    /// the cart has no line for the variant.
    pub async fn update_quantity(
        &self,
        cookie_cart: Option<Cart>,
        variant_id: &str,
        quantity: i32,
    ) -> Result<Cart, CartError> {
        if variant_id.is_empty() || quantity < 1 {
            return Err(CartError::InvalidInput);
        }

        let mut cart = self.current(cookie_cart).await;
        if !cart.set_quantity(variant_id, quantity) {
            return Err(CartError::NotFound(variant_id.to_string()));
        }

        self.save(&cart).await;
        Ok(cart)
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank id, `NotFound` when the cart has no line
    /// for the variant.
    pub async fn remove(
        &self,
        cookie_cart: Option<Cart>,
        variant_id: &str,
    ) -> Result<Cart, CartError> {
        if variant_id.is_empty() {
            return Err(CartError::InvalidInput);
        }

        let mut cart = self.current(cookie_cart).await;
        if !cart.remove(variant_id) {
            return Err(CartError::NotFound(variant_id.to_string()));
        }

        self.save(&cart).await;
        Ok(cart)
    }

    /// Clear the cart for checkout and hand the order off to payment.
    ///
    /// No order record is written here; the payment flow downstream owns
    /// that. The empty-cart check deliberately runs before the sign-in
    /// check so an anonymous visitor with nothing in the cart sees the
    /// right message.
    ///
    /// # Errors
    ///
    /// `EmptyCart` when there is nothing to check out, `NotAuthenticated`
    /// when the session has no customer id.
    pub async fn checkout(
        &self,
        cookie_cart: Option<Cart>,
        payment_method: &str,
    ) -> Result<Cart, CartError> {
        let mut cart = self.current(cookie_cart).await;
        if cart.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let customer_id = self
            .session
            .get::<String>(session_keys::CUSTOMER_ID)
            .await
            .ok()
            .flatten();
        let Some(customer_id) = customer_id.filter(|id| !id.is_empty()) else {
            return Err(CartError::NotAuthenticated);
        };

        tracing::info!(
            customer_id,
            payment_method,
            total = cart.total_price(),
            lines = cart.items().len(),
            "checkout accepted, clearing cart"
        );

        cart.clear();
        self.save(&cart).await;
        Ok(cart)
    }

    /// Cart as mutations see it: session first, cookie fallback, empty
    /// when neither has anything. No demo seeding here.
    async fn current(&self, cookie_cart: Option<Cart>) -> Cart {
        match self.read_session_cart().await {
            Some(stored) => stored,
            None => cookie_cart.unwrap_or_default(),
        }
    }

    /// A corrupt session value counts as present-but-empty, not absent, so
    /// it does not fall through to a stale cookie.
    async fn read_session_cart(&self) -> Option<Cart> {
        match self.session.get::<Cart>(session_keys::CART).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "cart in session failed to deserialize, treating as empty");
                Some(Cart::default())
            }
        }
    }

    async fn save(&self, cart: &Cart) {
        if let Err(e) = self.session.insert(session_keys::CART, cart).await {
            tracing::error!(error = %e, "failed to persist cart to session");
        }
    }
}
