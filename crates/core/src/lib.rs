//! Pocketwave Core - Shared domain types.
//!
//! This crate provides common types used across the Pocketwave components:
//! - `storefront` - Customer-facing phone shop frontend
//! - `integration-tests` - End-to-end tests against a running storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, phone numbers, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
