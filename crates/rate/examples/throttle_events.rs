//! Throttle example - thinning a scroll event stream

use rate::Throttler;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let throttler = Throttler::new(
        Duration::from_millis(200),
        Arc::new(|offset: u32| {
            println!("🖼 Repainting minimap at scroll offset {}", offset);
        }),
    );

    // Simulate a scroll wheel spinning: an event every 50ms, far more
    // often than a repaint is worth doing
    for offset in (0..20u32).map(|i| i * 120) {
        throttler.call(offset).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Let the held trailing fire drain
    tokio::time::sleep(Duration::from_millis(300)).await;
    println!("✅ Scroll stream ended");

    Ok(())
}
