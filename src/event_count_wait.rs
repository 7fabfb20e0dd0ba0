use std::{borrow::Cow, fmt, future::IntoFuture, time::Duration};

use crate::{
    Error, EventSource, Kind, Result,
    poller::{self, DEFAULT_TIMEOUT},
};

/// Waits until at least `count` events of the given kind have been observed.
///
/// Each poll filters the source's snapshot down to the matching kind,
/// preserving insertion order. The wait resolves with the **entire** filtered
/// sequence from the tick that first reached the threshold — never fewer
/// events than requested, possibly more if extras had already accumulated.
///
/// On timeout the failure message reports how many matching events had been
/// observed at the final check.
///
/// # Example
///
/// ```ignore
/// let messages = wait_for_event_count(log.clone(), "AGENT_MESSAGE", 2).await?;
///
/// // With a custom timeout
/// let messages = wait_for_event_count(log.clone(), "AGENT_MESSAGE", 2)
///     .within(Duration::from_secs(1))
///     .await?;
/// ```
pub fn wait_for_event_count<S>(
    source: S,
    kind: impl Into<Cow<'static, str>>,
    count: usize,
) -> EventCountWait<S>
where
    S: EventSource,
    S::Event: Kind,
{
    EventCountWait {
        source,
        kind: kind.into(),
        count,
        timeout: DEFAULT_TIMEOUT,
    }
}

/// A pending wait for a number of events of a given kind.
///
/// Created by [`wait_for_event_count`]. Await it directly for the default
/// 5-second timeout, or chain [`within`](Self::within) first.
pub struct EventCountWait<S: EventSource> {
    source: S,
    kind: Cow<'static, str>,
    count: usize,
    timeout: Duration,
}

impl<S> EventCountWait<S>
where
    S: EventSource,
    S::Event: Kind,
{
    /// Override the default 5-second timeout.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(self) -> Result<Vec<S::Event>> {
        let mut observed = 0;
        let outcome = poller::poll_until(self.timeout, || {
            let matching: Vec<S::Event> = self
                .source
                .snapshot()
                .into_iter()
                .filter(|event| event.kind() == self.kind)
                .collect();
            observed = matching.len();
            (observed >= self.count).then_some(matching)
        })
        .await;

        outcome.map_err(|timed_out| Error::Timeout {
            subject: format!("{} {} events", self.count, self.kind),
            timeout: self.timeout,
            elapsed: timed_out.elapsed,
            observed: Some(observed),
        })
    }
}

impl<S> IntoFuture for EventCountWait<S>
where
    S: EventSource + 'static,
    S::Event: Kind + 'static,
{
    type Output = Result<Vec<S::Event>>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output>>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<S: EventSource> fmt::Debug for EventCountWait<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCountWait")
            .field("kind", &self.kind)
            .field("count", &self.count)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::EventLog;

    #[derive(Clone, Debug, PartialEq)]
    enum BusEvent {
        Msg(&'static str),
        Heartbeat,
    }

    impl Kind for BusEvent {
        fn kind(&self) -> Cow<'static, str> {
            Cow::Borrowed(match self {
                BusEvent::Msg(_) => "MSG",
                BusEvent::Heartbeat => "HEARTBEAT",
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_on_the_tick_the_threshold_is_first_met() {
        let log = EventLog::new();

        // One MSG every 20ms; the third arrives only after resolution.
        let producer = log.clone();
        tokio::spawn(async move {
            for msg in ["a", "b", "c"] {
                tokio::time::sleep(Duration::from_millis(20)).await;
                producer.push(BusEvent::Msg(msg));
            }
        });

        let start = Instant::now();
        let events = wait_for_event_count(log, "MSG", 2)
            .within(Duration::from_millis(1000))
            .await
            .unwrap();
        let elapsed = start.elapsed();

        assert_eq!(events, vec![BusEvent::Msg("a"), BusEvent::Msg("b")]);
        assert!(elapsed >= Duration::from_millis(40), "resolved at {elapsed:?}");
        assert!(elapsed <= Duration::from_millis(50), "resolved at {elapsed:?}");
    }

    #[tokio::test]
    async fn returns_every_match_present_at_resolution() {
        let log = EventLog::new();
        log.push(BusEvent::Msg("a"));
        log.push(BusEvent::Heartbeat);
        log.push(BusEvent::Msg("b"));
        log.push(BusEvent::Msg("c"));

        // Three matches had already accumulated; no truncation to two.
        let events = wait_for_event_count(log, "MSG", 2).await.unwrap();
        assert_eq!(
            events,
            vec![BusEvent::Msg("a"), BusEvent::Msg("b"), BusEvent::Msg("c")]
        );
    }

    #[tokio::test]
    async fn filtering_preserves_order_and_duplicates() {
        let log = EventLog::new();
        log.push(BusEvent::Msg("a"));
        log.push(BusEvent::Heartbeat);
        log.push(BusEvent::Msg("a"));
        log.push(BusEvent::Msg("b"));

        let events = wait_for_event_count(log, "MSG", 3).await.unwrap();
        assert_eq!(
            events,
            vec![BusEvent::Msg("a"), BusEvent::Msg("a"), BusEvent::Msg("b")]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_reports_the_observed_count() {
        let log = EventLog::new();
        log.push(BusEvent::Msg("only one"));

        let err = wait_for_event_count(log, "MSG", 2)
            .within(Duration::from_millis(100))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Timeout waiting for 2 MSG events after 100ms (got 1)"
        );

        let Error::Timeout { observed, .. } = err;
        assert_eq!(observed, Some(1));
    }
}
