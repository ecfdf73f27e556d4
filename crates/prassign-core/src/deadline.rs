use std::{future::Future, time::Duration};

use crate::{DomainError, Result};

/// Run `future` under a deadline, failing with
/// [`DomainError::DeadlineExceeded`] when it does not complete in time.
/// The future is dropped on expiry.
pub async fn with_deadline<T, F>(timeout_ms: u64, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(Duration::from_millis(timeout_ms), future)
        .await
        .map_err(|_| DomainError::DeadlineExceeded { timeout_ms })?
}
