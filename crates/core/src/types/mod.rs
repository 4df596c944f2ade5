//! Core types for Pocketwave.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod phone;
pub mod role;

pub use id::*;
pub use phone::{Phone, PhoneError};
pub use role::StaffRole;
