//! Payload shapes shared by the instructions.
//!
//! Instructions differ in their keyword and priority but carry one of four payloads:
//! a key/value pair, an ordered list of unique values, a single scalar, or an exec form
//! (a command name followed by its arguments).

use std::fmt;

use itertools::Itertools;

/// A key and its value, e.g. the source and destination of a `COPY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue<V = String> {
    key: String,
    value: V,
}

impl<V> KeyValue<V> {
    pub fn new(key: impl Into<String>, value: impl Into<V>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = key.into();
        self
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<V>) -> &mut Self {
        self.value = value.into();
        self
    }
}

/// An ordered list of values.
///
/// The list keeps values as they are given; only [`add_value`](Self::add_value) skips a value
/// that is already present.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValueList {
    values: Vec<String>,
}

impl ValueList {
    /// Creates a list holding the given values in order.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        list.set_values(values);
        list
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Replaces every value of the list, repeated values included.
    pub fn set_values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Appends `value` unless it is already part of the list.
    pub fn add_value(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !self.has_value(&value) {
            self.values.push(value);
        }
        self
    }

    pub fn has_value(&self, value: &str) -> bool {
        self.index_of(value).is_some()
    }

    /// Position of the first occurrence of `value`, `None` if absent.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }

    /// Removes every occurrence of `value`, leaving the order of the other values untouched.
    pub fn remove_value(&mut self, value: &str) -> &mut Self {
        self.values.retain(|v| v != value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ValueList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// A single value, e.g. the user of a `USER` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    value: String,
}

impl Scalar {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }
}

/// A command name followed by its arguments, rendered as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecForm {
    command: String,
    arguments: ValueList,
}

impl ExecForm {
    pub fn new<I, S>(command: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            arguments: ValueList::new(arguments),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn set_command(&mut self, command: impl Into<String>) -> &mut Self {
        self.command = command.into();
        self
    }

    pub fn arguments(&self) -> &ValueList {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut ValueList {
        &mut self.arguments
    }

    /// Writes `KEYWORD ["command", "arg1", ...]`.
    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>, keyword: &str) -> fmt::Result {
        let parts = std::iter::once(self.command.as_str()).chain(self.arguments.iter());
        write!(f, "{keyword} {}", json_array(parts))
    }
}

/// Renders the values as a JSON string array, e.g. `["a", "b"]`.
pub(crate) fn json_array<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    format!("[{}]", values.into_iter().map(json_string).join(", "))
}

/// Quotes a value as a JSON string literal, escaping quotes and backslashes.
pub(crate) fn json_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
