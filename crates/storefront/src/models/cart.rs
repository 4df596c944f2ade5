//! Shopping cart model and its cookie codec.
//!
//! The cart lives in two places at once: the server-side session (the
//! source of truth while the session is alive) and a client-readable
//! cookie that survives session expiry. Both hold the same JSON array of
//! line items; the cookie value is additionally percent-encoded.

use serde::{Deserialize, Serialize};

use pocketwave_core::VariantId;

/// One cart line, keyed by product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub variant_id: VariantId,
    pub name: String,
    /// Unit price in minor units (cents).
    pub unit_price: i64,
    pub quantity: i32,
    pub image_url: String,
}

impl CartItem {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// The whole cart. Serializes as a bare JSON array so the cookie format
/// stays readable by storefront script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Demo cart shown to first-time visitors with no saved state.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            items: vec![
                CartItem {
                    variant_id: VariantId::new("CT001"),
                    name: "iPhone 14 128GB".to_string(),
                    unit_price: 199_000,
                    quantity: 1,
                    image_url: "/static/images/iphone-14.svg".to_string(),
                },
                CartItem {
                    variant_id: VariantId::new("CT002"),
                    name: "iPhone 14 256GB".to_string(),
                    unit_price: 199_000,
                    quantity: 2,
                    image_url: "/static/images/iphone-14.svg".to_string(),
                },
            ],
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals, in minor units.
    #[must_use]
    pub fn total_price(&self) -> i64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Set the quantity for an existing line. Returns `false` when no line
    /// matches the variant.
    pub fn set_quantity(&mut self, variant_id: &str, quantity: i32) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.variant_id.as_str() == variant_id)
        {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns `false` when no line matches the variant.
    pub fn remove(&mut self, variant_id: &str) -> bool {
        let before = self.items.len();
        self.items
            .retain(|item| item.variant_id.as_str() != variant_id);
        self.items.len() != before
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Encode for storage in the persistence cookie.
    #[must_use]
    pub fn to_cookie_value(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string());
        urlencoding::encode(&json).into_owned()
    }

    /// Decode a persistence cookie value.
    ///
    /// Returns `None` for anything unparseable; a corrupt cookie is treated
    /// the same as no cookie at all.
    #[must_use]
    pub fn from_cookie_value(raw: &str) -> Option<Self> {
        let decoded = urlencoding::decode(raw).ok()?;
        match serde_json::from_str(&decoded) {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::debug!(error = %e, "cart cookie held unparseable JSON, ignoring");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn one_line(variant_id: &str, unit_price: i64, quantity: i32) -> CartItem {
        CartItem {
            variant_id: VariantId::new(variant_id),
            name: format!("Handset {variant_id}"),
            unit_price,
            quantity,
            image_url: "/static/images/placeholder.svg".to_string(),
        }
    }

    fn cart_of(items: Vec<CartItem>) -> Cart {
        Cart { items }
    }

    #[test]
    fn test_demo_cart_shape() {
        let cart = Cart::demo();
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].variant_id.as_str(), "CT001");
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.items()[1].variant_id.as_str(), "CT002");
        assert_eq!(cart.items()[1].quantity, 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_total_price_sums_line_totals() {
        let cart = cart_of(vec![one_line("CT001", 199_000, 1), one_line("CT002", 50_000, 3)]);
        assert_eq!(cart.total_price(), 199_000 + 150_000);
    }

    #[test]
    fn test_set_quantity_existing_line() {
        let mut cart = cart_of(vec![one_line("CT001", 199_000, 1)]);
        assert!(cart.set_quantity("CT001", 5));
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_set_quantity_unknown_line() {
        let mut cart = cart_of(vec![one_line("CT001", 199_000, 1)]);
        assert!(!cart.set_quantity("CT999", 5));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_line() {
        let mut cart = cart_of(vec![one_line("CT001", 199_000, 1), one_line("CT002", 50_000, 2)]);
        assert!(cart.remove("CT001"));
        assert_eq!(cart.items().len(), 1);
        assert!(!cart.remove("CT001"));
    }

    #[test]
    fn test_cookie_round_trip() {
        let cart = Cart::demo();
        let encoded = cart.to_cookie_value();
        // Percent-encoded, so no raw JSON delimiters survive
        assert!(!encoded.contains('['));
        assert!(!encoded.contains('"'));

        let decoded = Cart::from_cookie_value(&encoded).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_cookie_accepts_unencoded_json() {
        // Script-written cookies may skip percent-encoding entirely
        let raw = r#"[{"variantId":"CT009","name":"Pixel 9","unitPrice":89900,"quantity":1,"imageUrl":"/static/images/pixel.png"}]"#;
        let cart = Cart::from_cookie_value(raw).unwrap();
        assert_eq!(cart.items()[0].variant_id.as_str(), "CT009");
        assert_eq!(cart.total_price(), 89_900);
    }

    #[test]
    fn test_cookie_rejects_garbage() {
        assert!(Cart::from_cookie_value("not json at all").is_none());
        assert!(Cart::from_cookie_value("%7B%22broken%22").is_none());
        assert!(Cart::from_cookie_value("").is_none());
    }

    #[test]
    fn test_empty_cart_round_trips() {
        let cart = Cart::default();
        let decoded = Cart::from_cookie_value(&cart.to_cookie_value()).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.total_price(), 0);
    }
}
