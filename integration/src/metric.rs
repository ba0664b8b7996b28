// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Generic real-time metric representation, independent of any specific metrics backend
//! (Prometheus, StatsD, etc).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single real-time metric observation (eg/ WebSocket message latency, reconnect count).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Metric {
    pub name: &'static str,
    pub time: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub fields: Vec<Field>,
}

impl Metric {
    pub fn new(name: &'static str, time: DateTime<Utc>) -> Self {
        Self {
            name,
            time,
            tags: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_tag(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    pub fn with_field(mut self, key: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.push(Field::new(key, value));
        self
    }
}

/// A `Metric` dimension used to filter/group observations (eg/ `exchange=b3`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tag {
    pub key: &'static str,
    pub value: String,
}

impl Tag {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// A `Metric` measurement (eg/ `latency_ms=12.4`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Field {
    pub key: &'static str,
    pub value: FieldValue,
}

impl Field {
    pub fn new(key: &'static str, value: impl Into<FieldValue>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// The value of a `Metric` [`Field`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
