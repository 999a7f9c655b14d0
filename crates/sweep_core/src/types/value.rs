//! The JSON-shaped parameter tree.
//!
//! Every simulation parameter set is a [`Config`]: a mapping from parameter
//! names to [`Value`] trees. Values are deliberately minimal: numbers,
//! strings, lists, and nested mappings, mirroring what a JSON parameter file
//! can express. Booleans and nulls are intentionally absent from the union.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The root parameter set: a mapping from parameter names to values.
///
/// Backed by a `BTreeMap` so key iteration order is deterministic, which
/// keeps resolved output and emitted records stable across runs.
pub type Config = BTreeMap<String, Value>;

/// A single parameter value.
///
/// Serialises untagged: a JSON number becomes [`Value::Number`], a JSON
/// string [`Value::Text`], and so on. Deserialising a JSON boolean or null
/// fails, since neither has a representation in this union.
///
/// # Examples
///
/// ```
/// use sweep_core::types::Value;
///
/// let value: Value = serde_json::from_str(r#"{"gain": 2.5, "mode": "fast"}"#).unwrap();
/// let map = value.as_map().unwrap();
/// assert_eq!(map["gain"].as_number(), Some(2.5));
/// assert_eq!(map["mode"].as_text(), Some("fast"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric value. All numbers are carried as `f64`.
    Number(f64),
    /// A string value. May act as a reference to another parameter.
    Text(String),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A nested mapping of named values.
    Map(Config),
}

impl Value {
    /// Returns the number if this value is numeric.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this value is text.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the element slice if this value is a list.
    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the mapping if this value is a map.
    #[inline]
    pub fn as_map(&self) -> Option<&Config> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the numbers of a homogeneous numeric list.
    ///
    /// `None` if this value is not a list or any element is non-numeric.
    /// Action collapse uses this to decide whether a table column is fully
    /// resolved.
    pub fn as_number_list(&self) -> Option<Vec<f64>> {
        match self {
            Value::List(items) => items.iter().map(Value::as_number).collect(),
            _ => None,
        }
    }

    /// True if this value is a number.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Config> for Value {
    fn from(map: Config) -> Self {
        Value::Map(map)
    }
}

impl fmt::Display for Value {
    /// Renders the value in compact JSON-like form.
    ///
    /// Intended for log lines and record cells; numbers use the shortest
    /// round-trip representation, `NaN` renders as `NaN`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
