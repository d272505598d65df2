use std::fmt;

use super::{
    shape::{json_array, json_string, KeyValue},
    CommandKind,
};

/// `ADD ["src", "dest"]`: imports a host path, the source is rewritten when archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFile(KeyValue);

/// `COPY ["src", "dest"]`: imports a host path, the source is rewritten when archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFile(KeyValue);

/// `ENV key=value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Env(KeyValue);

/// `LABEL "key"="value"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(KeyValue);

/// `ARG name` or `ARG name=default`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg(KeyValue<Option<String>>);

impl AddFile {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self(KeyValue::new(source, destination))
    }
}

impl CopyFile {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self(KeyValue::new(source, destination))
    }
}

impl Env {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self(KeyValue::new(key, value))
    }
}

impl Label {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self(KeyValue::new(key, value))
    }
}

impl Arg {
    /// A build argument without a default value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(KeyValue::new(name, None::<String>))
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        let default: String = default.into();
        Self(KeyValue::new(name, Some(default)))
    }
}

shape_command!(AddFile, KeyValue, CommandKind::Add);
shape_command!(CopyFile, KeyValue, CommandKind::Copy);
shape_command!(Env, KeyValue, CommandKind::Env);
shape_command!(Label, KeyValue, CommandKind::Label);
shape_command!(Arg, KeyValue<Option<String>>, CommandKind::Arg);

impl fmt::Display for AddFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ADD {}", json_array([self.key(), self.value().as_str()]))
    }
}

impl fmt::Display for CopyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "COPY {}", json_array([self.key(), self.value().as_str()]))
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ENV {}={}", self.key(), self.value())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LABEL {}={}",
            json_string(self.key()),
            json_string(self.value())
        )
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(default) => write!(f, "ARG {}={default}", self.key()),
            None => write!(f, "ARG {}", self.key()),
        }
    }
}
