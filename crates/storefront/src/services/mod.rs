//! Business logic services for the storefront.
//!
//! - `auth` - login, logout, and registration against the backend API
//! - `cart` - session-backed cart operations

pub mod auth;
pub mod cart;
