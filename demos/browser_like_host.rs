//! Example: delegating to a host event target, including a legacy host
use rs_cvent::{CustomEvent, EventEmitter, EventHandler, SimpleEventTarget, Value};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    for host in [SimpleEventTarget::new(), SimpleEventTarget::legacy()] {
        let emitter = EventEmitter::with_target(host.target());
        println!("native dispatch: {}", emitter.is_native());

        emitter.on(
            "button:click",
            Value::function(|event| println!("clicked with {}", event.detail())),
        );
        emitter.emit("button:click", "left").unwrap();

        // Events dispatched by the host reach the same listeners.
        host.dispatch_event(&CustomEvent::new("button:click", Value::from("right")));

        emitter.destroy();
        println!("host listeners after destroy: {}", host.listener_count("button:click"));
    }
}
