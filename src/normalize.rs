//! Event-name expansion and the per-name iteration every public operation
//! goes through.

use std::convert::Infallible;

use crate::{Listener, Value};

/// The result of [`normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Trimmed event names, in the order supplied.
    pub names: Vec<String>,
    /// `None` when no listener was supplied, the no-op listener when the supplied one is not callable.
    pub listener: Option<Listener>,
}

/// Expands an event argument into individual names and sanitizes a listener.
///
/// - A string is split on commas; an array is used element by element; anything else yields no names.
/// - Every name is trimmed. Non-string array entries are coerced with their `Display` form.
/// - Empty and duplicate names are kept.
///
/// # Example
/// ```
/// use rs_cvent::{normalize, Listener, Value};
///
/// let normalized = normalize(&Value::from(" click, hover ,,"), None);
/// assert_eq!(normalized.names, vec!["click", "hover", "", ""]);
/// assert!(normalized.listener.is_none());
///
/// let normalized = normalize(&Value::from(vec![Value::from("a"), Value::from(1)]), Some(&Value::from(5)));
/// assert_eq!(normalized.names, vec!["a", "1"]);
/// assert_eq!(normalized.listener, Some(Listener::noop()));
/// ```
pub fn normalize(event: &Value, listener: Option<&Value>) -> Normalized {
    let names = match event {
        Value::String(s) => s.split(',').map(|name| name.trim().to_string()).collect(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string().trim().to_string(),
            })
            .collect(),
        _ => Vec::new(),
    };

    let listener = listener.map(|value| Listener::from_value(value).unwrap_or_else(Listener::noop));

    Normalized { names, listener }
}

/// Context handed to the per-name action of [`for_each_event`].
#[derive(Debug, Clone, Copy)]
pub struct EachEvent<'a> {
    pub event_name: &'a str,
    pub index: usize,
    pub names: &'a [String],
    pub listener: Option<&'a Listener>,
}

impl EachEvent<'_> {
    pub fn total_names(&self) -> usize {
        self.names.len()
    }
}

/// Runs `action` once per normalized name, in order.
///
/// Does nothing when the event argument normalizes to no names.
///
/// # Example
/// ```
/// use rs_cvent::{for_each_event, Value};
///
/// let mut seen = Vec::new();
/// for_each_event(&Value::from(["a", "b"]), None, |each| {
///     seen.push((each.event_name.to_string(), each.index, each.total_names()));
/// });
/// assert_eq!(seen, vec![("a".to_string(), 0, 2), ("b".to_string(), 1, 2)]);
/// ```
pub fn for_each_event<F>(event: &Value, listener: Option<&Value>, mut action: F)
where
    F: FnMut(EachEvent<'_>),
{
    let result: Result<(), Infallible> = try_for_each_event(event, listener, |each| {
        action(each);
        Ok(())
    });
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// Like [`for_each_event`], but stops at the first name whose action fails.
pub fn try_for_each_event<F, E>(event: &Value, listener: Option<&Value>, mut action: F) -> Result<(), E>
where
    F: FnMut(EachEvent<'_>) -> Result<(), E>,
{
    let Normalized { names, listener } = normalize(event, listener);
    if names.is_empty() {
        return Ok(());
    }

    for (index, event_name) in names.iter().enumerate() {
        action(EachEvent {
            event_name,
            index,
            names: &names,
            listener: listener.as_ref(),
        })?;
    }
    Ok(())
}

