//! Dynamic values passed as event names, listeners and payloads.
//!
//! [`Value`] is a closed set of kinds. [`classify`] maps a value to its
//! canonical [`Tag`], which is what the emitter branches on when it has to
//! decide whether an argument is a name list or a callable.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::{AsyncCallback, Callback, CustomEvent, SharedError};

/// Canonical kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Error,
    Date,
    Function,
    AsyncFunction,
}

impl Tag {
    /// The canonical tag name, e.g. `"Number"` or `"AsyncFunction"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Undefined => "Undefined",
            Tag::Null => "Null",
            Tag::Boolean => "Boolean",
            Tag::Number => "Number",
            Tag::String => "String",
            Tag::Array => "Array",
            Tag::Object => "Object",
            Tag::Error => "Error",
            Tag::Date => "Date",
            Tag::Function => "Function",
            Tag::AsyncFunction => "AsyncFunction",
        }
    }

    /// Whether values of this kind can be registered as listeners.
    pub fn is_callable(&self) -> bool {
        matches!(self, Tag::Function | Tag::AsyncFunction)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed value.
///
/// Event names, listeners and payloads all travel as `Value`s so that a
/// single call can accept `"a,b"`, `["a", "b"]`, a callback, or something
/// malformed, and degrade predictably in the last case.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
    Error(SharedError),
    Date(SystemTime),
    Function(Callback),
    AsyncFunction(AsyncCallback),
}

/// Returns the canonical [`Tag`] of `value`.
///
/// # Example
/// ```
/// use rs_cvent::{classify, Tag, Value};
///
/// assert_eq!(classify(&Value::from("click")), Tag::String);
/// assert_eq!(classify(&Value::from(vec!["a", "b"])), Tag::Array);
/// assert_eq!(classify(&Value::from(3)), Tag::Number);
/// assert_eq!(classify(&Value::Undefined).to_string(), "Undefined");
/// ```
pub fn classify(value: &Value) -> Tag {
    match value {
        Value::Undefined => Tag::Undefined,
        Value::Null => Tag::Null,
        Value::Bool(_) => Tag::Boolean,
        Value::Number(_) => Tag::Number,
        Value::String(_) => Tag::String,
        Value::Array(_) => Tag::Array,
        Value::Object(_) => Tag::Object,
        Value::Error(_) => Tag::Error,
        Value::Date(_) => Tag::Date,
        Value::Function(_) => Tag::Function,
        Value::AsyncFunction(_) => Tag::AsyncFunction,
    }
}

impl Value {
    /// Shorthand for [`classify`].
    pub fn tag(&self) -> Tag {
        classify(self)
    }

    /// Wraps a synchronous closure as a callable value.
    pub fn function(f: impl Fn(&CustomEvent) + Send + Sync + 'static) -> Self {
        Value::Function(Arc::new(f))
    }

    /// Wraps an error as a payload.
    pub fn error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Value::Error(Arc::new(err))
    }

    pub fn is_callable(&self) -> bool {
        self.tag().is_callable()
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&SharedError> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Looks up `key` when the value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }
}

/// String coercion used for non-string event names.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Error(e) => write!(f, "Error: {e}"),
            Value::Date(t) => match t.duration_since(SystemTime::UNIX_EPOCH) {
                Ok(d) => write!(f, "{}", d.as_millis()),
                Err(_) => f.write_str("Invalid Date"),
            },
            Value::Function(_) => f.write_str("[function]"),
            Value::AsyncFunction(_) => f.write_str("[async function]"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("Undefined"),
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Value::Error(e) => f.debug_tuple("Error").field(&e.to_string()).finish(),
            Value::Date(t) => f.debug_tuple("Date").field(t).finish(),
            Value::Function(_) => f.write_str("Function"),
            Value::AsyncFunction(_) => f.write_str("AsyncFunction"),
        }
    }
}

/// Callables and errors compare by identity, everything else structurally.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => same_allocation(a, b),
            (Value::Function(a), Value::Function(b)) => same_allocation(a, b),
            (Value::AsyncFunction(a), Value::AsyncFunction(b)) => same_allocation(a, b),
            _ => false,
        }
    }
}

/// Compares the data pointers of two `Arc`s, ignoring vtables.
pub(crate) fn same_allocation<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::Array(items.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::Array(items.into_iter().map(Value::from).collect())
    }
}

impl From<&[&str]> for Value {
    fn from(items: &[&str]) -> Self {
        Value::Array(items.iter().map(|s| Value::from(*s)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(items: [&str; N]) -> Self {
        Value::Array(items.into_iter().map(Value::from).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<SystemTime> for Value {
    fn from(t: SystemTime) -> Self {
        Value::Date(t)
    }
}

impl From<SharedError> for Value {
    fn from(e: SharedError) -> Self {
        Value::Error(e)
    }
}

impl From<Callback> for Value {
    fn from(f: Callback) -> Self {
        Value::Function(f)
    }
}

impl From<&Callback> for Value {
    fn from(f: &Callback) -> Self {
        Value::Function(Arc::clone(f))
    }
}

impl From<AsyncCallback> for Value {
    fn from(f: AsyncCallback) -> Self {
        Value::AsyncFunction(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Undefined, Into::into)
    }
}
