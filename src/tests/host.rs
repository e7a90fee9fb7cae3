use std::sync::Arc;

use super::{count, counter};
use crate::{CustomEvent, HostOperation, HostTarget, Listener, SimpleEventTarget, TargetError, Value};

#[test]
fn native_dispatch_needs_all_three_operations() {
    let host = SimpleEventTarget::new();
    assert!(host.target().supports_native_dispatch());

    for missing in [
        HostOperation::AddListener,
        HostOperation::RemoveListener,
        HostOperation::Dispatch,
    ] {
        let target = host.target_builder().without(missing).build();
        assert!(!target.supports_native_dispatch(), "{missing:?} missing");
    }

    let without_constructor = host.target_builder().without(HostOperation::NewCustomEvent).build();
    assert!(without_constructor.supports_native_dispatch());
}

#[test]
fn missing_operations_report_unsupported() {
    let target = HostTarget::builder().build();
    let listener = Listener::noop();

    assert!(matches!(target.add_listener("a", &listener), Err(TargetError::Unsupported(_))));
    assert!(matches!(target.remove_listener("a", &listener), Err(TargetError::Unsupported(_))));
    assert!(matches!(
        target.dispatch(&CustomEvent::new("a", Value::Null)),
        Err(TargetError::Unsupported(_))
    ));
}

#[test]
fn modern_construction() {
    let host = SimpleEventTarget::new();
    let event = host.target().construct_event("tick", Value::from(1)).unwrap();
    assert_eq!(event, CustomEvent::new("tick", Value::from(1)));
}

#[test]
fn legacy_host_falls_back_to_two_step_construction() {
    let host = SimpleEventTarget::legacy();
    assert!(host.new_custom_event("tick", Value::Null).is_err());

    let event = host.target().construct_event("tick", Value::from("detail")).unwrap();
    assert!(event.is_initialized());
    assert_eq!(event.event_type(), "tick");
    assert_eq!(event.detail(), &Value::from("detail"));

    let without_factory = host.target_builder().without(HostOperation::CreateEvent).build();
    let event = without_factory.construct_event("tock", Value::from(2)).unwrap();
    assert_eq!(event, CustomEvent::new("tock", Value::from(2)));
}

#[test]
fn failing_legacy_factory_is_reported() {
    let target = HostTarget::builder()
        .new_custom_event(|_, _| Err(TargetError::Host("no constructor".to_string())))
        .create_event(|_| Err(TargetError::Host("no factory".to_string())))
        .build();

    assert_eq!(
        target.construct_event("a", Value::Null),
        Err(TargetError::Host("no factory".to_string()))
    );
}

#[test]
fn duplicate_adds_are_ignored() {
    let host = SimpleEventTarget::new();
    let (called, cb) = counter();
    let listener = Listener::from(cb);

    host.add_event_listener("click", &listener);
    host.add_event_listener("click", &listener);
    assert_eq!(host.listener_count("click"), 1);

    host.dispatch_event(&CustomEvent::new("click", Value::Null));
    assert_eq!(count(&called), 1);
    assert_eq!(host.dispatched(), 1);

    host.remove_event_listener("click", &listener);
    host.dispatch_event(&CustomEvent::new("click", Value::Null));
    assert_eq!(count(&called), 1);
}

#[test]
fn separately_built_targets_are_distinct() {
    let host = SimpleEventTarget::new();
    let a = host.target();
    let b = host.target();
    assert!(a.same_as(&a.clone()));
    assert!(!a.same_as(&b));
}

#[test]
fn listener_removing_itself_during_dispatch() {
    let host = SimpleEventTarget::new();
    let (called, cb) = counter();
    let other = Listener::from(cb);

    let host_clone = Arc::clone(&host);
    let other_clone = other.clone();
    let remover = Listener::Sync(Arc::new(move |_: &CustomEvent| {
        host_clone.remove_event_listener("click", &other_clone);
    }));

    host.add_event_listener("click", &remover);
    host.add_event_listener("click", &other);
    host.dispatch_event(&CustomEvent::new("click", Value::Null));

    // The snapshot still delivers to the listener removed mid-dispatch.
    assert_eq!(count(&called), 1);
    assert_eq!(host.listener_count("click"), 1);
}
