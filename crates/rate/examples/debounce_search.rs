//! Debounce example - collapsing keystrokes into one search request

use rate::Debouncer;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let debouncer = Debouncer::new(
        Duration::from_millis(300),
        Arc::new(|query: String| {
            println!("Searching for: {}", query);
        }),
    );

    // Simulate a user typing a query one keystroke at a time
    let keystrokes = ["r", "ru", "rus", "rust"];
    for partial in keystrokes {
        println!("Typed: {}", partial);
        debouncer.call(partial.to_string()).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    // Once the typing goes quiet, exactly one search fires with the
    // final query
    tokio::time::sleep(Duration::from_millis(500)).await;

    Ok(())
}
