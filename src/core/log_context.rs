//! Structured logging context for key-value fields
//!
//! This module provides:
//! - `FieldValue`: the value stored under a context key
//! - `LogContext`: an insertion-ordered set of fields attached to a record
//!   or bound to a child logger
//! - `SharedContext`: a lockable, aliasable context that may reference itself
//!
//! Rendering a context never fails. Values that cannot be represented in JSON
//! degrade to placeholder text instead of aborting the log call.

use parking_lot::RwLock;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Well-known context keys used by the convenience emitters.
pub mod keys {
    pub const COMPONENT: &str = "component";
    pub const ACTION: &str = "action";
    pub const USER_ID: &str = "userId";
    pub const SESSION_ID: &str = "sessionId";
    pub const CATEGORY: &str = "category";
    pub const OPERATION: &str = "operation";
    pub const DURATION: &str = "duration";
    /// Reserved for the message of an error passed to `error_with`.
    pub const ERROR: &str = "error";
}

const CIRCULAR: &str = "[Circular]";
const LOCKED: &str = "[Locked]";

/// Pointers of the shared contexts on the current rendering path.
type Seen = Vec<*const RwLock<LogContext>>;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<FieldValue>),
    Map(LogContext),
    Shared(SharedContext),
    /// Placeholder text for a value that could not be converted.
    Unrepresentable(String),
}

impl FieldValue {
    /// Convert any serializable value, degrading to
    /// [`FieldValue::Unrepresentable`] when serialization fails.
    ///
    /// ```
    /// use client_logger::FieldValue;
    /// use std::collections::BTreeMap;
    ///
    /// let ok = FieldValue::from_serialize(&vec![1, 2, 3]);
    /// assert_eq!(ok.to_string(), "[1,2,3]");
    ///
    /// let mut bad = BTreeMap::new();
    /// bad.insert((1, 2), "tuple keys are not JSON");
    /// assert!(matches!(FieldValue::from_serialize(&bad), FieldValue::Unrepresentable(_)));
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => FieldValue::from(value),
            Err(e) => FieldValue::Unrepresentable(format!("[Unserializable: {}]", e)),
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    ///
    /// Non-finite floats become `null`, cycles through [`SharedContext`]
    /// become `"[Circular]"`.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        self.json_value(&mut Vec::new())
    }

    fn json_value(&self, seen: &mut Seen) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Null => Value::Null,
            FieldValue::List(items) => {
                Value::Array(items.iter().map(|item| item.json_value(seen)).collect())
            }
            FieldValue::Map(context) => context.json_value(seen),
            FieldValue::Shared(shared) => shared.json_value(seen),
            FieldValue::Unrepresentable(text) => Value::String(text.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Unrepresentable(text) => write!(f, "{}", text),
            other => write!(f, "{}", other.to_json_value()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(i: $t) -> Self {
                    FieldValue::Int(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        i64::try_from(u)
            .map(FieldValue::Int)
            .unwrap_or(FieldValue::Float(u as f64))
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::from(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<LogContext> for FieldValue {
    fn from(context: LogContext) -> Self {
        FieldValue::Map(context)
    }
}

impl From<SharedContext> for FieldValue {
    fn from(shared: SharedContext) -> Self {
        FieldValue::Shared(shared)
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float))
                .unwrap_or(FieldValue::Null),
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => {
                FieldValue::List(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Object(map) => FieldValue::Map(map.into_iter().collect()),
        }
    }
}

/// Context for structured logging with key-value fields
///
/// Keys keep their insertion order. Setting a key that already exists
/// replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext {
    fields: Vec<(String, FieldValue)>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Context tagged with a component name
    pub fn for_component(name: impl Into<String>) -> Self {
        Self::new().with_field(keys::COMPONENT, name.into())
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.add_field(key, value);
        self
    }

    pub fn with_action(self, action: impl Into<String>) -> Self {
        self.with_field(keys::ACTION, action.into())
    }

    pub fn with_user_id(self, user_id: impl Into<FieldValue>) -> Self {
        self.with_field(keys::USER_ID, user_id)
    }

    pub fn with_session_id(self, session_id: impl Into<FieldValue>) -> Self {
        self.with_field(keys::SESSION_ID, session_id)
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        let index = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(index).1)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merge `other` into this context. Fields of `other` win on conflict.
    pub fn merge(&mut self, other: &LogContext) {
        for (key, value) in &other.fields {
            self.add_field(key.clone(), value.clone());
        }
    }

    /// Merged copy of this context with `other` layered on top.
    #[must_use]
    pub fn merged(&self, other: &LogContext) -> LogContext {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        self.json_value(&mut Vec::new())
    }

    fn json_value(&self, seen: &mut Seen) -> Value {
        let mut map = serde_json::Map::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.json_value(seen));
        }
        Value::Object(map)
    }

    /// Serialize to a compact JSON object, falling back to debug text.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.to_json_value()).unwrap_or_else(|_| {
            self.fields
                .iter()
                .map(|(k, v)| format!("{}={:?}", k, v))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

impl Serialize for LogContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}

impl<K, V> FromIterator<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = LogContext::new();
        context.extend(iter);
        context
    }
}

impl<K, V> Extend<(K, V)> for LogContext
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add_field(key, value);
        }
    }
}

impl IntoIterator for LogContext {
    type Item = (String, FieldValue);
    type IntoIter = std::vec::IntoIter<(String, FieldValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// A context that can be aliased and mutated after it was attached.
///
/// Because clones share the same storage, a shared context can end up
/// containing itself. Rendering detects this and prints `"[Circular]"`.
/// A shared context that is write-locked by another thread at render time
/// prints `"[Locked]"` rather than waiting.
#[derive(Clone, Default)]
pub struct SharedContext(Arc<RwLock<LogContext>>);

impl SharedContext {
    pub fn new(context: LogContext) -> Self {
        Self(Arc::new(RwLock::new(context)))
    }

    /// Set a field in the context
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        let value = value.into();
        self.0.write().add_field(key, value);
    }

    pub fn remove(&self, key: &str) -> Option<FieldValue> {
        self.0.write().remove(key)
    }

    /// Copy of the current fields
    pub fn snapshot(&self) -> LogContext {
        self.0.read().clone()
    }

    fn json_value(&self, seen: &mut Seen) -> Value {
        let ptr = Arc::as_ptr(&self.0);
        if seen.contains(&ptr) {
            return Value::String(CIRCULAR.to_string());
        }
        match self.0.try_read() {
            Some(context) => {
                seen.push(ptr);
                let value = context.json_value(seen);
                seen.pop();
                value
            }
            None => Value::String(LOCKED.to_string()),
        }
    }
}

impl fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedContext({:p})", Arc::as_ptr(&self.0))
    }
}

impl PartialEq for SharedContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
