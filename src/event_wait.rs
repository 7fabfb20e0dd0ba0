use std::{borrow::Cow, fmt, future::IntoFuture, time::Duration};

use crate::{
    Error, EventSource, Kind, Result,
    poller::{self, DEFAULT_TIMEOUT},
};

/// Waits for the first event carrying the given kind tag.
///
/// The source is polled every 10ms, scanning its snapshot left to right, so
/// the wait resolves with the earliest-inserted matching event — even when
/// several matches have accumulated by the time one is found.
///
/// # Example
///
/// ```ignore
/// let event = wait_for_event(log.clone(), "TOOL_RESULT").await?;
///
/// // With a custom timeout
/// let event = wait_for_event(log.clone(), "TOOL_RESULT")
///     .within(Duration::from_secs(1))
///     .await?;
/// ```
pub fn wait_for_event<S>(source: S, kind: impl Into<Cow<'static, str>>) -> EventWait<S>
where
    S: EventSource,
    S::Event: Kind,
{
    EventWait {
        source,
        kind: kind.into(),
        timeout: DEFAULT_TIMEOUT,
    }
}

/// A pending wait for one event of a given kind.
///
/// Created by [`wait_for_event`]. Await it directly for the default
/// 5-second timeout, or chain [`within`](Self::within) first.
pub struct EventWait<S: EventSource> {
    source: S,
    kind: Cow<'static, str>,
    timeout: Duration,
}

impl<S> EventWait<S>
where
    S: EventSource,
    S::Event: Kind,
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
                .find(|event| event.kind() == self.kind)
        })
        .await;

        outcome.map_err(|timed_out| Error::Timeout {
            subject: format!("{} event", self.kind),
            timeout: self.timeout,
            elapsed: timed_out.elapsed,
            observed: None,
        })
    }
}

impl<S> IntoFuture for EventWait<S>
where
    S: EventSource + 'static,
    S::Event: Kind + 'static,
{
    type Output = Result<S::Event>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output>>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<S: EventSource> fmt::Debug for EventWait<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventWait")
            .field("kind", &self.kind)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use tokio::time::Instant;

    use super::*;
    use crate::EventLog;

    #[derive(Clone, Debug, PartialEq)]
    enum HarnessEvent {
        ToolResult(u32),
        AgentMessage(&'static str),
    }

    impl Kind for HarnessEvent {
        fn kind(&self) -> Cow<'static, str> {
            Cow::Borrowed(match self {
                HarnessEvent::ToolResult(_) => "TOOL_RESULT",
                HarnessEvent::AgentMessage(_) => "AGENT_MESSAGE",
            })
        }
    }

    #[tokio::test]
    async fn resolves_without_a_second_poll_when_already_present() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let source = move || {
            counter.set(counter.get() + 1);
            vec![
                HarnessEvent::AgentMessage("hi"),
                HarnessEvent::ToolResult(7),
            ]
        };

        let event = wait_for_event(source, "TOOL_RESULT").await.unwrap();

        assert_eq!(event, HarnessEvent::ToolResult(7));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn earliest_inserted_match_wins() {
        let log = EventLog::new();
        log.push(HarnessEvent::AgentMessage("first"));
        log.push(HarnessEvent::ToolResult(1));
        log.push(HarnessEvent::ToolResult(2));

        let event = wait_for_event(log, "TOOL_RESULT").await.unwrap();
        assert_eq!(event, HarnessEvent::ToolResult(1));
    }

    #[tokio::test(start_paused = true)]
    async fn resolves_shortly_after_the_event_arrives() {
        let log = EventLog::new();

        let producer = log.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            producer.push(HarnessEvent::ToolResult(1));
        });

        let start = Instant::now();
        let event = wait_for_event(log, "TOOL_RESULT")
            .within(Duration::from_millis(1000))
            .await
            .unwrap();
        let elapsed = start.elapsed();

        assert_eq!(event, HarnessEvent::ToolResult(1));
        assert!(elapsed >= Duration::from_millis(50), "resolved at {elapsed:?}");
        assert!(elapsed <= Duration::from_millis(60), "resolved at {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_names_the_kind_and_the_deadline() {
        let log: EventLog<HarnessEvent> = EventLog::new();

        let start = Instant::now();
        let err = wait_for_event(log, "X")
            .within(Duration::from_millis(100))
            .await
            .unwrap_err();
        let waited = start.elapsed();

        assert_eq!(err.to_string(), "Timeout waiting for X event after 100ms");
        assert!(waited >= Duration::from_millis(100));
        assert!(waited <= Duration::from_millis(110));

        let Error::Timeout {
            timeout,
            elapsed,
            observed,
            ..
        } = err;
        assert_eq!(timeout, Duration::from_millis(100));
        assert!(elapsed > timeout);
        assert_eq!(observed, None);
    }

    #[tokio::test(start_paused = true)]
    async fn independent_waiters_share_one_source() {
        let log = EventLog::new();

        let producer = log.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            producer.push(HarnessEvent::AgentMessage("progress"));
            tokio::time::sleep(Duration::from_millis(20)).await;
            producer.push(HarnessEvent::ToolResult(9));
        });

        let start = Instant::now();
        let (tool, message) = tokio::join!(
            wait_for_event(log.clone(), "TOOL_RESULT").within(Duration::from_millis(500)),
            wait_for_event(log.clone(), "AGENT_MESSAGE").within(Duration::from_millis(500)),
        );

        assert_eq!(tool.unwrap(), HarnessEvent::ToolResult(9));
        assert_eq!(message.unwrap(), HarnessEvent::AgentMessage("progress"));
        // Interleaved on one task, not run back to back.
        assert!(start.elapsed() <= Duration::from_millis(60));
    }
}
