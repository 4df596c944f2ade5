//! Backend CRUD API integration.
//!
//! Everything the storefront knows about accounts, catalog, and promotions
//! comes through [`BackendClient`]. Handlers never talk to `reqwest`
//! directly.

pub mod client;
pub mod types;

pub use client::{ApiError, BackendClient};
pub use types::{Customer, Employee, NewCustomer, ProductImage, ProductVariant, Promotion};
