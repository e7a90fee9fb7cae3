//! Example: debounced and throttled emission on a Tokio runtime
use std::time::Duration;

use rs_cvent::{EmitterFactory, EventHandler, TimingOptions, Value};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let factory = EmitterFactory::new();
    let emitter = factory.get_instance(None);
    emitter
        .on("search", Value::function(|event| println!("search for {}", event.detail())))
        .on("scroll", Value::function(|event| println!("scroll to {}", event.detail())));

    // Typing: only the last query is searched.
    for query in ["r", "ru", "rus", "rust"] {
        emitter.emit_debounce("search", query, TimingOptions::new().wait(300));
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Scrolling: at most one event every 200ms.
    for offset in 0..20 {
        emitter.emit_throttle("scroll", offset * 10, TimingOptions::new().wait(200));
        tokio::time::sleep(Duration::from_millis(40)).await;
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    factory.destroy();
}
