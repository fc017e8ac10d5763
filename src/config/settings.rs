//! # Provider settings values.
//!
//! [`SettingsValue`] is the closed value type used for provider settings and result metadata.
//! There is deliberately no open "any" variant: every value can cross task boundaries and be
//! compared structurally.
//!
//! ## Example
//! ```rust
//! use livenessvisor::{Settings, SettingsValue};
//!
//! let mut settings = Settings::new();
//! settings.insert("api_key".into(), "secret".into());
//! settings.insert("retries".into(), 3.into());
//! settings.insert("tags".into(), vec!["a", "b"].into());
//!
//! assert_eq!(settings["api_key"].as_str(), Some("secret"));
//! assert_eq!(settings["retries"].as_int(), Some(3));
//! assert_eq!(settings["tags"].as_array().map(|a| a.len()), Some(2));
//! ```

use std::collections::BTreeMap;

/// Settings map keyed by setting name.
pub type Settings = BTreeMap<String, SettingsValue>;

/// Closed sum type for settings and metadata values.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsValue {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    Array(Vec<SettingsValue>),
    Map(Settings),
}

impl SettingsValue {
    /// Returns the string payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingsValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingsValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a floating point view; `Int` values are widened.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            SettingsValue::Double(x) => Some(*x),
            SettingsValue::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingsValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[SettingsValue]> {
        match self {
            SettingsValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Settings> {
        match self {
            SettingsValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for SettingsValue {
    fn from(v: &str) -> Self {
        SettingsValue::String(v.to_owned())
    }
}

impl From<String> for SettingsValue {
    fn from(v: String) -> Self {
        SettingsValue::String(v)
    }
}

impl From<i64> for SettingsValue {
    fn from(v: i64) -> Self {
        SettingsValue::Int(v)
    }
}

impl From<i32> for SettingsValue {
    fn from(v: i32) -> Self {
        SettingsValue::Int(i64::from(v))
    }
}

impl From<f64> for SettingsValue {
    fn from(v: f64) -> Self {
        SettingsValue::Double(v)
    }
}

impl From<bool> for SettingsValue {
    fn from(v: bool) -> Self {
        SettingsValue::Bool(v)
    }
}

impl<T: Into<SettingsValue>> From<Vec<T>> for SettingsValue {
    fn from(v: Vec<T>) -> Self {
        SettingsValue::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Settings> for SettingsValue {
    fn from(v: Settings) -> Self {
        SettingsValue::Map(v)
    }
}
