//! Waits on events emitted by a simulated agent run.
//!
//! Run with: `cargo run --example tool-result`

use std::borrow::Cow;
use std::time::Duration;

use vigil::{EventLog, Kind, Result, wait_for_event, wait_for_event_count, wait_for_event_match};

#[derive(Clone, Debug)]
enum AgentEvent {
    ToolResult { call_id: u32, output: &'static str },
    AgentMessage(&'static str),
}

impl Kind for AgentEvent {
    fn kind(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            AgentEvent::ToolResult { .. } => "TOOL_RESULT",
            AgentEvent::AgentMessage(_) => "AGENT_MESSAGE",
        })
    }
}

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let log = EventLog::new();

    // Stand-in for a system under test reporting progress as events.
    let producer = log.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        producer.push(AgentEvent::AgentMessage("calling the calculator"));
        tokio::time::sleep(Duration::from_millis(30)).await;
        producer.push(AgentEvent::ToolResult { call_id: 1, output: "4" });
        tokio::time::sleep(Duration::from_millis(30)).await;
        producer.push(AgentEvent::AgentMessage("2 + 2 = 4"));
    });

    let result = wait_for_event(log.clone(), "TOOL_RESULT")
        .within(Duration::from_secs(1))
        .await?;
    println!("tool produced: {result:?}");

    let messages = wait_for_event_count(log.clone(), "AGENT_MESSAGE", 2)
        .within(Duration::from_secs(1))
        .await?;
    println!("{} agent messages: {messages:?}", messages.len());

    let answer = wait_for_event_match(
        log.clone(),
        |e| matches!(e, AgentEvent::ToolResult { call_id: 1, .. }),
        "TOOL_RESULT for call 1",
    )
    .await?;
    println!("answer to call 1: {answer:?}");

    Ok(())
}
