use super::{count, counter};
use crate::{EmitterConfig, EmitterFactory, EventHandler, SimpleEventTarget};

#[test]
fn instance_is_created_lazily_and_shared() {
    let factory = EmitterFactory::new();
    assert!(factory.current().is_none());

    let first = factory.get_instance(None);
    let second = factory.get_instance(None);
    let (called, cb) = counter();

    first.on("a", &cb);
    second.emit("a", ()).unwrap();
    assert_eq!(count(&called), 1);
    assert!(factory.current().is_some());
}

#[test]
fn same_target_keeps_instance() {
    let factory = EmitterFactory::new();
    let host = SimpleEventTarget::new();
    let target = host.target();
    let (_, cb) = counter();

    factory.get_instance(Some(target.clone())).on("a", &cb);
    assert_eq!(factory.get_instance(Some(target.clone())).listener_count("a"), 1);
    // No target keeps whatever exists.
    assert_eq!(factory.get_instance(None).listener_count("a"), 1);
}

#[test]
fn different_target_recreates_instance() {
    let factory = EmitterFactory::new();
    let (_, cb) = counter();

    let headless = factory.get_instance(None);
    headless.on("a", &cb);
    assert!(!headless.is_native());

    let host = SimpleEventTarget::new();
    let native = factory.get_instance(Some(host.target()));
    assert!(native.is_native());
    assert_eq!(native.listener_count("a"), 0);

    let other_host = SimpleEventTarget::new();
    let replaced = factory.get_instance(Some(other_host.target()));
    assert!(replaced.target().unwrap().same_as(&factory.current().unwrap().target().unwrap()));

    // Replaced instances are left alone.
    assert_eq!(headless.listener_count("a"), 1);
}

#[test]
fn destroy_forgets_instance() {
    let factory = EmitterFactory::with_config(EmitterConfig::default().max_listeners(3));
    let (called, cb) = counter();

    let emitter = factory.get_instance(None);
    assert_eq!(emitter.max_listeners(), 3);
    emitter.on("a", &cb);

    factory.destroy();
    assert!(factory.current().is_none());
    emitter.emit("a", ()).unwrap();
    assert_eq!(count(&called), 0);

    let fresh = factory.get_instance(None);
    assert_eq!(fresh.listener_count("a"), 0);
}
