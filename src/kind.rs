use std::borrow::Cow;

/// The type tag of an event.
///
/// The kind-keyed waiters ([`wait_for_event`](crate::wait_for_event) and
/// [`wait_for_event_count`](crate::wait_for_event_count)) compare this tag
/// against the kind string they were given. Implement it for your event type
/// (often an enum, returning the variant's tag).
///
/// Waiters that take a predicate or a probe do not require it.
///
/// # Example
///
/// ```rust
/// use std::borrow::Cow;
/// use vigil::Kind;
///
/// #[derive(Clone, Debug)]
/// enum HarnessEvent {
///     ToolResult { call_id: u32 },
///     AgentMessage(String),
/// }
///
/// impl Kind for HarnessEvent {
///     fn kind(&self) -> Cow<'static, str> {
///         Cow::Borrowed(match self {
///             HarnessEvent::ToolResult { .. } => "TOOL_RESULT",
///             HarnessEvent::AgentMessage(_) => "AGENT_MESSAGE",
///         })
///     }
/// }
///
/// assert_eq!(HarnessEvent::AgentMessage("hi".into()).kind(), "AGENT_MESSAGE");
/// ```
pub trait Kind {
    /// Returns the type tag for this event.
    fn kind(&self) -> Cow<'static, str>;
}
