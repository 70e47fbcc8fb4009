//! Free-form option bags.
//!
//! Plugin options are an open map whose values are restricted to a small set
//! of JSON shapes, so unknown plugins round-trip without an untyped blob.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Options keyed by plugin name.
pub type PluginOptions = BTreeMap<String, OptionValue>;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<OptionValue>),
    Map(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value.into())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::String(value)
    }
}

impl<V: Into<OptionValue>> From<Vec<V>> for OptionValue {
    fn from(values: Vec<V>) -> Self {
        OptionValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, OptionValue>> for OptionValue {
    fn from(map: BTreeMap<String, OptionValue>) -> Self {
        OptionValue::Map(map)
    }
}
