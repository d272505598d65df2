use std::fmt;

use super::{shape::KeyValue, CommandKind};

/// `FROM name[:tag]`: the image the build starts from.
///
/// The image name is held as the key and the optional tag as the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromImage(KeyValue<Option<String>>);

impl FromImage {
    /// An image without an explicit tag, resolved by the engine (usually `latest`).
    pub fn new(image: impl Into<String>) -> Self {
        Self(KeyValue::new(image, None::<String>))
    }

    pub fn with_tag(image: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        Self(KeyValue::new(image, Some(tag)))
    }

    pub fn image(&self) -> &str {
        self.key()
    }

    pub fn tag(&self) -> Option<&str> {
        self.value().as_deref()
    }
}

shape_command!(FromImage, KeyValue<Option<String>>, CommandKind::From);

impl fmt::Display for FromImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => write!(f, "FROM {}:{tag}", self.image()),
            None => write!(f, "FROM {}", self.image()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::DockerfileCommand;

    #[test]
    fn renders_tag_when_present() {
        assert_eq!(
            FromImage::with_tag("rust", "1.80-slim").to_string(),
            "FROM rust:1.80-slim"
        );
        assert_eq!(FromImage::new("alpine").to_string(), "FROM alpine");
    }

    #[test]
    fn tag_can_be_replaced() {
        let mut from = FromImage::new("debian");
        from.set_value(Some("bookworm".to_string()));

        assert_eq!(from.tag(), Some("bookworm"));
        assert_eq!(from.to_string(), "FROM debian:bookworm");
        assert_eq!(from.priority(), 2);
    }
}
