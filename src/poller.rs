use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Delay between unsuccessful probe evaluations.
///
/// A design constant, not a tunable: the waiters do not expose it.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Deadline applied to a wait unless overridden with `within`.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// How a poll loop ended when its condition was never met.
#[derive(Debug)]
pub(crate) struct TimedOut {
    pub(crate) elapsed: Duration,
}

/// Drives `probe` until it yields a value or `timeout` elapses.
///
/// The first evaluation happens synchronously, before any suspension, so a
/// condition that already holds resolves without touching the timer. Each
/// later evaluation is separated from the previous one by [`POLL_INTERVAL`].
///
/// A probe evaluation always precedes its own deadline check: a probe that
/// turns true after the deadline has technically passed still wins, but once
/// a deadline check fails the loop ends with no further evaluation.
pub(crate) async fn poll_until<T, F>(timeout: Duration, mut probe: F) -> Result<T, TimedOut>
where
    F: FnMut() -> Option<T>,
{
    let start = Instant::now();
    let mut polls: u32 = 0;

    loop {
        polls += 1;
        if let Some(value) = probe() {
            tracing::trace!(polls, elapsed = ?start.elapsed(), "condition met");
            return Ok(value);
        }

        let elapsed = start.elapsed();
        if elapsed > timeout {
            tracing::debug!(polls, ?elapsed, ?timeout, "condition not met before deadline");
            return Err(TimedOut { elapsed });
        }

        sleep(POLL_INTERVAL).await;
    }
}
