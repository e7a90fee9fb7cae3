//! Example: headless emitter with once listeners and the `error` convention
use std::io;

use rs_cvent::{EventEmitter, EventHandler, Value};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let emitter = EventEmitter::new();
    emitter
        .on(
            "client_connected, client_left",
            Value::function(|event| println!("{}: {}", event.event_type(), event.detail())),
        )
        .once("ready", Value::function(|_| println!("ready, fired once")));

    emitter.emit(["client_connected", "client_left"], "Alice").unwrap();
    emitter.emit("ready", ()).unwrap();
    emitter.emit("ready", ()).unwrap();

    // Nobody listens for `error`, so the payload comes back to the caller.
    match emitter.emit("error", Value::error(io::Error::other("disk full"))) {
        Ok(_) => println!("error was handled"),
        Err(err) => println!("emit failed: {err}"),
    }
}
