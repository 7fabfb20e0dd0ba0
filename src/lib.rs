//! # Vigil
//!
//! Condition-based waiting for Tokio tests.
//!
//! Tests that drive an asynchronous, event-producing system usually know
//! *what* they are waiting for — an event, a count, a state change — but not
//! *when* it will happen. A fixed-duration sleep turns that into a guess that
//! is wrong in both directions: too short and the test flakes, too long and
//! the suite crawls. Vigil replaces the guess with bounded polling that
//! resolves on the first check after the condition becomes true.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::borrow::Cow;
//! use std::time::Duration;
//!
//! use vigil::{EventLog, Kind, wait_for_event};
//!
//! #[derive(Clone, Debug)]
//! enum HarnessEvent {
//!     ToolResult { call_id: u32 },
//!     AgentMessage(String),
//! }
//!
//! impl Kind for HarnessEvent {
//!     fn kind(&self) -> Cow<'static, str> {
//!         Cow::Borrowed(match self {
//!             HarnessEvent::ToolResult { .. } => "TOOL_RESULT",
//!             HarnessEvent::AgentMessage(_) => "AGENT_MESSAGE",
//!         })
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> vigil::Result {
//!     let log = EventLog::new();
//!
//!     // The system under test appends events as it makes progress.
//!     let producer = log.clone();
//!     tokio::spawn(async move {
//!         tokio::time::sleep(Duration::from_millis(50)).await;
//!         producer.push(HarnessEvent::ToolResult { call_id: 7 });
//!     });
//!
//!     // Resolves as soon as the event shows up, not a moment later.
//!     let event = wait_for_event(log.clone(), "TOOL_RESULT")
//!         .within(Duration::from_secs(1))
//!         .await?;
//!     println!("observed {event:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Entry Points
//!
//! | Function | Resolves with |
//! |----------|---------------|
//! | [`wait_for_event`] | The first event carrying a given [`Kind`] tag |
//! | [`wait_for_event_count`] | All events of a kind, once at least N exist |
//! | [`wait_for_event_match`] | The first event satisfying a predicate |
//! | [`wait_for`] | The first `Some` value an arbitrary probe yields |
//!
//! Each returns a builder: await it directly for the default 5-second
//! timeout, or chain `.within(duration)` first. Event-keyed waiters read
//! events through an [`EventSource`] — any `Fn() -> Vec<E>` closure, or the
//! provided [`EventLog`].
//!
//! ## Polling Model
//!
//! All waiters share one loop. The condition is checked synchronously up
//! front, so an already-true condition resolves without touching the timer;
//! afterwards it is re-checked every 10ms ([`POLL_INTERVAL`]) until it holds
//! or the deadline passes, with overshoot bounded by one interval. On
//! failure every waiter returns [`Error::Timeout`] with a message of the
//! shape `Timeout waiting for <subject> after <ms>ms`.
//!
//! Waiters only ever read their source; results preserve the source's
//! insertion order.
//!
//! # Note
//!
//! Wait futures are boxed and `!Send` — they are designed for
//! single-threaded test contexts. Run waits concurrently on one task with
//! `tokio::join!` or `tokio::select!` rather than spawning them.
//!
//! Dropping a wait future stops its polling; there is no separate
//! cancellation handle. A panic in a caller-supplied probe or predicate
//! propagates out of the wait immediately rather than being retried.

mod condition_wait;
mod error;
mod event_count_wait;
mod event_match_wait;
mod event_wait;
mod kind;
mod poller;
mod source;

pub use condition_wait::{ConditionWait, wait_for};
pub use error::Error;
pub use event_count_wait::{EventCountWait, wait_for_event_count};
pub use event_match_wait::{EventMatchWait, wait_for_event_match};
pub use event_wait::{EventWait, wait_for_event};
pub use kind::Kind;
pub use poller::{DEFAULT_TIMEOUT, POLL_INTERVAL};
pub use source::{EventLog, EventSource};

/// Convenience alias for `Result<T, vigil::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
