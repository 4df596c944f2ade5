//! Authentication error types.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur during login and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Form input failed validation. The message is shown to the visitor
    /// as-is.
    #[error("{0}")]
    Validation(String),

    /// No account matched the phone/password pair.
    #[error("invalid phone number or password")]
    InvalidCredentials,

    /// The backend API failed or rejected the operation.
    #[error(transparent)]
    Api(#[from] ApiError),
}
