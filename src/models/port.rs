// Firewalld Gateway - Port Model
// SPDX-License-Identifier: MIT

//! Firewall port rule model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInput;

/// Transport protocol of a port rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
    Dccp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
            Self::Sctp => "sctp",
            Self::Dccp => "dccp",
        }
    }
}

impl FromStr for Protocol {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            "sctp" => Ok(Self::Sctp),
            "dccp" => Ok(Self::Dccp),
            other => Err(InvalidInput::BadProtocol(other.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explicit (port, protocol) rule.
///
/// The port is a single number or an inclusive range like "8000-8010",
/// kept as a string because that is the daemon's wire form for both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPortRule")]
pub struct PortRule {
    port: String,
    protocol: Protocol,
}

#[derive(Deserialize)]
struct RawPortRule {
    port: String,
    protocol: Protocol,
}

impl PortRule {
    pub fn new(port: impl Into<String>, protocol: Protocol) -> Result<Self, InvalidInput> {
        let port = port.into();
        validate_port(&port)?;
        Ok(Self { port, protocol })
    }

    /// Parse the "8080/tcp" form the daemon and callers both use.
    pub fn parse(s: &str) -> Result<Self, InvalidInput> {
        let (port, protocol) = s
            .split_once('/')
            .ok_or_else(|| InvalidInput::BadPort(s.to_string()))?;
        Self::new(port, protocol.parse()?)
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// The `(port, protocol)` pair as sent over the bus.
    pub(crate) fn to_pair(&self) -> (String, String) {
        (self.port.clone(), self.protocol.as_str().to_string())
    }
}

impl TryFrom<RawPortRule> for PortRule {
    type Error = InvalidInput;

    fn try_from(raw: RawPortRule) -> Result<Self, Self::Error> {
        Self::new(raw.port, raw.protocol)
    }
}

impl fmt::Display for PortRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.protocol)
    }
}

fn validate_port(port: &str) -> Result<(), InvalidInput> {
    let bad = || InvalidInput::BadPort(port.to_string());
    match port.split_once('-') {
        Some((lo, hi)) => {
            let lo: u16 = lo.parse().map_err(|_| bad())?;
            let hi: u16 = hi.parse().map_err(|_| bad())?;
            if lo == 0 || lo > hi {
                return Err(bad());
            }
        }
        None => {
            let single: u16 = port.parse().map_err(|_| bad())?;
            if single == 0 {
                return Err(bad());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_single_ports_and_ranges() {
        assert_eq!(PortRule::new("22", Protocol::Tcp).unwrap().port(), "22");
        let range = PortRule::new("8000-8010", Protocol::Udp).unwrap();
        assert_eq!(range.to_pair(), ("8000-8010".to_string(), "udp".to_string()));
    }

    #[test]
    fn rejects_malformed_ports() {
        assert!(PortRule::new("", Protocol::Tcp).is_err());
        assert!(PortRule::new("0", Protocol::Tcp).is_err());
        assert!(PortRule::new("80000", Protocol::Tcp).is_err());
        assert!(PortRule::new("9000-8000", Protocol::Tcp).is_err());
        assert!(PortRule::new("http", Protocol::Tcp).is_err());
    }

    #[test]
    fn parses_slash_form() {
        let rule = PortRule::parse("443/tcp").unwrap();
        assert_eq!(rule.protocol(), Protocol::Tcp);
        assert_eq!(rule.to_string(), "443/tcp");
        assert!(PortRule::parse("443").is_err());
        assert!(PortRule::parse("443/bogus").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let rule: PortRule = serde_json::from_str(r#"{"port":"9999","protocol":"tcp"}"#).unwrap();
        assert_eq!(rule.to_string(), "9999/tcp");
        assert!(serde_json::from_str::<PortRule>(r#"{"port":"x","protocol":"tcp"}"#).is_err());
    }
}
