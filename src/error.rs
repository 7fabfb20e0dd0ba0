use std::time::Duration;

/// The single error type for all Vigil operations.
///
/// Every fallible Vigil API returns `vigil::Result<T>` (alias for
/// `Result<T, vigil::Error>`). A wait can only fail one way: its condition
/// was still unmet when the deadline passed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A wait ran out of time before its condition was met.
    #[error("Timeout waiting for {subject} after {}ms{}", .timeout.as_millis(), got(.observed))]
    Timeout {
        /// What was being awaited, as rendered in the failure message.
        subject: String,

        /// The configured deadline for the wait.
        timeout: Duration,

        /// Wall time actually spent before giving up. Always strictly
        /// greater than `timeout`, by at most one poll interval.
        elapsed: Duration,

        /// For count-based waits, the number of matching events observed
        /// at the final check.
        observed: Option<usize>,
    },
}

fn got(observed: &Option<usize>) -> String {
    match observed {
        Some(n) => format!(" (got {n})"),
        None => String::new(),
    }
}
