use std::fmt;

use itertools::Itertools;

use super::{
    shape::{json_array, ValueList},
    CommandKind,
};

/// `EXPOSE 80 443/udp`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Expose(ValueList);

/// `VOLUME ["/data", "/logs"]`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Volume(ValueList);

impl Expose {
    pub fn new<I, S>(ports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ValueList::new(ports))
    }
}

impl Volume {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ValueList::new(paths))
    }
}

shape_command!(Expose, ValueList, CommandKind::Expose);
shape_command!(Volume, ValueList, CommandKind::Volume);

impl fmt::Display for Expose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EXPOSE {}", self.iter().join(" "))
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VOLUME {}", json_array(self.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::DockerfileCommand;

    #[test]
    fn expose_joins_ports_with_spaces() {
        let mut expose = Expose::new(["80", "443"]);
        expose.add_value("53/udp").add_value("80");

        assert_eq!(expose.to_string(), "EXPOSE 80 443 53/udp");
        assert_eq!(expose.priority(), 19);
    }

    #[test]
    fn volume_renders_a_json_array() {
        let mut volume = Volume::new(["/data", "/logs"]);
        volume.remove_value("/logs").add_value("/cache");

        assert_eq!(volume.to_string(), r#"VOLUME ["/data", "/cache"]"#);
        assert_eq!(volume.priority(), 18);
    }
}
