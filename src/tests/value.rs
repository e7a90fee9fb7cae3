use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use futures::FutureExt;

use crate::{classify, AsyncCallback, CustomEvent, Tag, Value};

#[test]
fn classify_covers_every_variant() {
    let async_cb: AsyncCallback = Arc::new(|_| async {}.boxed());

    assert_eq!(classify(&Value::Undefined), Tag::Undefined);
    assert_eq!(classify(&Value::Null), Tag::Null);
    assert_eq!(classify(&Value::from(true)), Tag::Boolean);
    assert_eq!(classify(&Value::from(1.5)), Tag::Number);
    assert_eq!(classify(&Value::from("a")), Tag::String);
    assert_eq!(classify(&Value::from(vec!["a"])), Tag::Array);
    assert_eq!(classify(&Value::from(BTreeMap::<String, Value>::new())), Tag::Object);
    assert_eq!(classify(&Value::error(io::Error::other("x"))), Tag::Error);
    assert_eq!(classify(&Value::from(SystemTime::UNIX_EPOCH)), Tag::Date);
    assert_eq!(classify(&Value::function(|_| {})), Tag::Function);
    assert_eq!(classify(&Value::from(async_cb)), Tag::AsyncFunction);
}

#[test]
fn only_functions_are_callable() {
    let async_cb: AsyncCallback = Arc::new(|_| async {}.boxed());

    assert!(Value::function(|_| {}).is_callable());
    assert!(Value::from(async_cb).is_callable());
    assert!(!Value::from("fn").is_callable());
    assert!(!Value::Null.is_callable());
    assert!(!Value::from(0).is_callable());
}

#[test]
fn display_coerces_like_event_names() {
    assert_eq!(Value::from(1).to_string(), "1");
    assert_eq!(Value::from(2.5).to_string(), "2.5");
    assert_eq!(Value::from(vec!["a", "b"]).to_string(), "a,b");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Undefined.to_string(), "undefined");
    assert_eq!(Value::from(false).to_string(), "false");
    assert_eq!(
        Value::from(SystemTime::UNIX_EPOCH + Duration::from_millis(1500)).to_string(),
        "1500"
    );
}

#[test]
fn callables_and_errors_compare_by_identity() {
    let f = Value::function(|_| {});
    let g = Value::function(|_| {});
    assert_eq!(f, f.clone());
    assert_ne!(f, g);

    let e = Value::error(io::Error::other("boom"));
    assert_eq!(e, e.clone());
    assert_ne!(e, Value::error(io::Error::other("boom")));

    assert_eq!(Value::from("a"), Value::from(String::from("a")));
    assert_eq!(Value::from(()), Value::Null);
    assert_eq!(Value::from(None::<&str>), Value::Undefined);
}

#[test]
fn object_lookup() {
    let mut map = BTreeMap::new();
    map.insert("x".to_string(), Value::from(1));
    let object = Value::from(map);

    assert_eq!(object.get("x"), Some(&Value::from(1)));
    assert_eq!(object.get("y"), None);
    assert_eq!(Value::from("x").get("x"), None);
}

#[test]
fn custom_event_two_step_initialization() {
    let mut event = CustomEvent::uninitialized();
    assert!(!event.is_initialized());

    event.init_custom_event("tick", true, false, Value::from(3));
    assert!(event.is_initialized());
    assert_eq!(event.event_type(), "tick");
    assert_eq!(event.detail(), &Value::from(3));
    assert!(event.bubbles());
    assert!(!event.cancelable());
}
