//! Waits on a plain boolean-ish condition instead of an event stream.
//!
//! Run with: `cargo run --example readiness`

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};
use std::time::Duration;

use vigil::{Result, wait_for};

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let health_checks = Arc::new(AtomicU32::new(0));

    // A slow-starting service passing one health check every 20ms.
    let service = health_checks.clone();
    tokio::spawn(async move {
        for _ in 0..5 {
            tokio::time::sleep(Duration::from_millis(20)).await;
            service.fetch_add(1, Ordering::SeqCst);
        }
    });

    // Treat the service as ready once three health checks have passed.
    let checks = health_checks.clone();
    let seen = wait_for(
        move || {
            let passed = checks.load(Ordering::SeqCst);
            (passed >= 3).then_some(passed)
        },
        "3 successful health checks",
    )
    .within(Duration::from_secs(1))
    .await?;
    println!("service ready after {seen} health checks");

    // A condition that never comes true fails with a diagnosable message.
    let err = wait_for(|| None::<u32>, "a sixth health check")
        .within(Duration::from_millis(100))
        .await
        .unwrap_err();
    println!("as expected: {err}");

    Ok(())
}
