use std::{fmt, future::IntoFuture, time::Duration};

use crate::{
    Error, Result,
    poller::{self, DEFAULT_TIMEOUT},
};

/// Waits for an arbitrary probe to yield a value.
///
/// This is the most general primitive: the event-keyed waiters are
/// configurations of the same loop, kept distinct for ergonomics and for
/// clearer failure messages. The probe returns `Some(value)` when the
/// condition is met and `None` while it is not — an explicit split, so a
/// legitimate result of `0`, `""`, or `false` still counts as found.
///
/// A panic inside the probe propagates out of the wait immediately; it is
/// never caught and retried.
///
/// # Example
///
/// ```ignore
/// // Readiness expressed as a plain value-producing check
/// let port = wait_for(|| server.bound_port(), "server to bind a port").await?;
///
/// // With a custom timeout
/// let port = wait_for(|| server.bound_port(), "server to bind a port")
///     .within(Duration::from_secs(2))
///     .await?;
/// ```
pub fn wait_for<F, T>(probe: F, description: impl Into<String>) -> ConditionWait<F>
where
    F: FnMut() -> Option<T>,
{
    ConditionWait {
        probe,
        description: description.into(),
        timeout: DEFAULT_TIMEOUT,
    }
}

/// A pending wait on an arbitrary condition.
///
/// Created by [`wait_for`]. Await it directly for the default 5-second
/// timeout, or chain [`within`](Self::within) first.
pub struct ConditionWait<F> {
    probe: F,
    description: String,
    timeout: Duration,
}

impl<F> ConditionWait<F> {
    /// Override the default 5-second timeout.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run<T>(self) -> Result<T>
    where
        F: FnMut() -> Option<T>,
    {
        let ConditionWait {
            probe,
            description,
            timeout,
        } = self;

        let outcome = poller::poll_until(timeout, probe).await;

        outcome.map_err(|timed_out| Error::Timeout {
            subject: description,
            timeout,
            elapsed: timed_out.elapsed,
            observed: None,
        })
    }
}

impl<F, T> IntoFuture for ConditionWait<F>
where
    F: FnMut() -> Option<T> + 'static,
    T: 'static,
{
    type Output = Result<T>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output>>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<F> fmt::Debug for ConditionWait<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionWait")
            .field("description", &self.description)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
