//! Domain error types for carlog.

use thiserror::Error;

/// Failures the application reports to the user as-is.
///
/// Storage and I/O errors travel as plain `anyhow` errors; these variants
/// cover the rule violations the commands check for.
#[derive(Error, Debug, PartialEq)]
pub enum CarlogError {
    #[error("Not logged in. Run `carlog login` first")]
    NotLoggedIn,

    #[error("No car selected. Run `carlog car select` first")]
    NoCarSelected,

    #[error("Car {0} not found")]
    CarNotFound(i64),

    #[error("Service type {0} not found")]
    ServiceTypeNotFound(i64),

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
