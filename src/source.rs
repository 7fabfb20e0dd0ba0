use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// Read-only access to the events observed so far.
///
/// A source is a cheap accessor owned by the caller: every call returns a
/// snapshot of the current event sequence, in insertion order. Waiters call
/// it once per poll tick for the duration of a wait and never mutate it,
/// so the sequence may only grow between successive snapshots.
///
/// Any `Fn() -> Vec<E>` closure is a source, as is [`EventLog`].
///
/// # Example
///
/// ```rust
/// use vigil::EventSource;
///
/// let source = || vec!["ready", "steady"];
/// assert_eq!(source.snapshot(), vec!["ready", "steady"]);
/// ```
pub trait EventSource {
    /// The event type this source yields.
    type Event;

    /// Returns the events observed so far, in insertion order.
    fn snapshot(&self) -> Vec<Self::Event>;
}

impl<E, F> EventSource for F
where
    F: Fn() -> Vec<E>,
{
    type Event = E;

    fn snapshot(&self) -> Vec<E> {
        self()
    }
}

/// A shared, append-only event log for tests.
///
/// Clones are cheap handles onto the same log, so the producing half can be
/// moved into a spawned task while the test body waits on the other half.
///
/// # Example
///
/// ```rust
/// use vigil::{EventLog, EventSource};
///
/// let log = EventLog::new();
/// let producer = log.clone();
///
/// producer.push("STARTED");
/// assert_eq!(log.snapshot(), vec!["STARTED"]);
/// ```
pub struct EventLog<E> {
    events: Arc<Mutex<Vec<E>>>,
}

impl<E> EventLog<E> {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends an event to the log.
    pub fn push(&self, event: E) {
        self.lock().push(event);
    }

    /// Returns the number of events observed so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no events have been observed yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<E>> {
        // A producer that panicked mid-append never leaves the Vec in a
        // broken state, so poisoning carries no information here.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Clone> EventSource for EventLog<E> {
    type Event = E;

    fn snapshot(&self) -> Vec<E> {
        self.lock().clone()
    }
}

impl<E> Clone for EventLog<E> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventLog<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
