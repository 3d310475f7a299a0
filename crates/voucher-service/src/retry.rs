//! Caller-side retry wrapper for failable operations.
//!
//! Retry policy lives with callers of the voucher factory; the factory
//! itself never retries. This wrapper re-runs an operation a fixed number
//! of times with a short pause between attempts, logging each failure.

use std::future::Future;
use std::time::Duration;

/// Pause between attempts.
const RETRY_DELAY: Duration = Duration::from_millis(200);

/// Runs a failable async operation up to `attempts` times.
///
/// Returns the first success, or the last error once every attempt has
/// failed. An `attempts` of zero is treated as one.
pub async fn with_retries<T, E, F, Fut>(label: &str, attempts: u64, mut op: F) -> Result<T, E>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T, E>>,
	E: std::fmt::Display,
{
	let attempts = attempts.max(1);
	let mut tried = 0;
	loop {
		match op().await {
			Ok(value) => return Ok(value),
			Err(err) => {
				tried += 1;
				if tried >= attempts {
					tracing::error!("{} failed after {} attempts: {}", label, tried, err);
					return Err(err);
				}
				tracing::warn!("{} failed (attempt {}/{}): {}", label, tried, attempts, err);
				tokio::time::sleep(RETRY_DELAY).await;
			}
		}
	}
}
