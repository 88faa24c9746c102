//! Background execution of blocking data-access operations.
//!
//! SQLite calls block the calling thread. Commands hand them to tokio's
//! blocking pool and await the result, which keeps the async command layer
//! free of direct database calls.

use anyhow::Result;
use tokio::task;
use tracing::debug;

/// Runs `operation` on the blocking pool and resolves with its result.
///
/// A panic inside the operation surfaces as an error, not as a crash of the
/// runtime.
pub async fn run<T, F>(operation: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    debug!("dispatching blocking operation");
    task::spawn_blocking(operation).await?
}
