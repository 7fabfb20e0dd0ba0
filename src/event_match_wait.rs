use std::{fmt, future::IntoFuture, time::Duration};

use crate::{
    Error, EventSource, Result,
    poller::{self, DEFAULT_TIMEOUT},
};

/// Waits for the first event satisfying an arbitrary predicate.
///
/// The source is scanned in insertion order on every poll, so the wait
/// resolves with the earliest event the predicate accepts. The description
/// exists purely to make otherwise-opaque predicate logic diagnosable: it is
/// embedded verbatim in the timeout message.
///
/// # Example
///
/// ```ignore
/// let event = wait_for_event_match(
///     log.clone(),
///     |e| matches!(e, HarnessEvent::ToolResult { call_id, .. } if *call_id == 123),
///     "TOOL_RESULT with call_id=123",
/// )
/// .await?;
/// ```
pub fn wait_for_event_match<S, P>(
    source: S,
    predicate: P,
    description: impl Into<String>,
) -> EventMatchWait<S, P>
where
    S: EventSource,
    P: Fn(&S::Event) -> bool,
{
    EventMatchWait {
        source,
        predicate,
        description: description.into(),
        timeout: DEFAULT_TIMEOUT,
    }
}

/// A pending wait for an event matching a predicate.
///
/// Created by [`wait_for_event_match`]. Await it directly for the default
/// 5-second timeout, or chain [`within`](Self::within) first.
pub struct EventMatchWait<S: EventSource, P> {
    source: S,
    predicate: P,
    description: String,
    timeout: Duration,
}

impl<S, P> EventMatchWait<S, P>
where
    S: EventSource,
    P: Fn(&S::Event) -> bool,
{
    /// Override the default 5-second timeout.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(self) -> Result<S::Event> {
        let outcome = poller::poll_until(self.timeout, || {
            self.source
                .snapshot()
                .into_iter()
                .find(|event| (self.predicate)(event))
        })
        .await;

        outcome.map_err(|timed_out| Error::Timeout {
            subject: self.description,
            timeout: self.timeout,
            elapsed: timed_out.elapsed,
            observed: None,
        })
    }
}

impl<S, P> IntoFuture for EventMatchWait<S, P>
where
    S: EventSource + 'static,
    S::Event: 'static,
    P: Fn(&S::Event) -> bool + 'static,
{
    type Output = Result<S::Event>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output>>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<S: EventSource, P> fmt::Debug for EventMatchWait<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventMatchWait")
            .field("description", &self.description)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
