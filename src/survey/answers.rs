//! Answer values and the answer set the engine mutates

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A file attached to a `file` question.
///
/// Only metadata is kept; file contents never enter the answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    #[serde(rename = "type")]
    pub mime: String,
    pub size: u64,
}

/// Type-safe answer values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Files(Vec<FileAttachment>),
}

impl AnswerValue {
    /// Convert a JSON literal (trigger `setValue`) into an answer value
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(
                items
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Value::Null | Value::Object(_) => None,
        }
    }

    /// Whether the value counts as "not answered"
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bool(_) | Self::Number(_) => false,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Files(files) => files.is_empty(),
        }
    }

    /// Length as seen by `{name.length}` in expressions
    pub fn length(&self) -> usize {
        match self {
            Self::Bool(_) | Self::Number(_) => 0,
            Self::Text(s) => s.chars().count(),
            Self::List(items) => items.len(),
            Self::Files(files) => files.len(),
        }
    }

    /// Short human-readable rendering for the UI
    pub fn display(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(", "),
            Self::Files(files) => files
                .iter()
                .map(|f| format!("{} ({}, {} bytes)", f.name, f.mime, f.size))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Mapping from question name to the user's answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AnswerValue> {
        self.values.get(name)
    }

    /// Store a value. Empty values remove the entry, as the engine never keeps blanks.
    pub fn set(&mut self, name: &str, value: AnswerValue) {
        if value.is_empty() {
            self.values.remove(name);
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<AnswerValue> {
        self.values.remove(name)
    }

    /// True when the question has a non-empty answer
    pub fn is_answered(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_empty())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Text view of a single-choice answer
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(AnswerValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// List view of a multi-choice answer (empty when unanswered)
    pub fn list(&self, name: &str) -> &[String] {
        match self.values.get(name) {
            Some(AnswerValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
