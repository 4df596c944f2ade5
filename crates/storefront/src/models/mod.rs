//! Domain models for the storefront.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartItem};
pub use session::{CUSTOMER_ROLE, UserSession, keys as session_keys};
