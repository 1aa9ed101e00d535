//! The unified error handling system for the application.

// 1. Core Types
pub use auth::AuthError;
pub use types::{ChirpyError, GENERIC_ERROR_MESSAGE};

/// A unified `Result` type for the entire application.
///
/// All functions that can fail should return this type.
pub type Result<T> = std::result::Result<T, ChirpyError>;

// 2. Module declarations
pub mod auth;
pub mod macros;
pub mod types;

// 3. Error Category for logging and alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Errors caused by the client (e.g., bad input, invalid credentials).
    /// Corresponds to 4xx HTTP status codes.
    Client,
    /// Errors caused by the server or its dependencies.
    /// Corresponds to 5xx HTTP status codes.
    Server,
}

#[cfg(test)]
mod tests;
