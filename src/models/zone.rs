// Firewalld Gateway - Zone Model
// SPDX-License-Identifier: MIT

//! Firewall zone name and permanent zone settings.

use std::fmt;

use serde::{Deserialize, Serialize};
use zbus::zvariant::Type;

use crate::errors::InvalidInput;
use crate::models::PortRule;

/// A firewall zone name, e.g. "public" or "internal".
///
/// Only rejects names that could never exist; whether the zone actually
/// exists is the daemon's call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneName(String);

impl ZoneName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidInput> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidInput::EmptyZone);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ZoneName {
    type Error = InvalidInput;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<ZoneName> for String {
    fn from(zone: ZoneName) -> Self {
        zone.0
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settings for defining a new permanent zone.
///
/// Covers the fields a gateway caller can usefully set; everything else in
/// the daemon's zone tuple is sent at its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSetting {
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub description: String,
    /// Zone target: "default", "ACCEPT", "DROP" or "%%REJECT%%".
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub ports: Vec<PortRule>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub masquerade: bool,
}

impl ZoneSetting {
    pub(crate) fn to_wire(&self) -> ZoneSettingWire {
        ZoneSettingWire {
            version: String::new(),
            short: self.short.clone(),
            description: self.description.clone(),
            unused: false,
            target: if self.target.is_empty() {
                "default".to_string()
            } else {
                self.target.clone()
            },
            services: self.services.clone(),
            ports: self.ports.iter().map(PortRule::to_pair).collect(),
            icmp_blocks: Vec::new(),
            masquerade: self.masquerade,
            forward_ports: Vec::new(),
            interfaces: self.interfaces.clone(),
            sources: self.sources.clone(),
            rich_rules: Vec::new(),
            protocols: Vec::new(),
            source_ports: Vec::new(),
            icmp_block_inversion: false,
        }
    }
}

/// The daemon's 16-field zone settings tuple,
/// `(sssbsasa(ss)asba(ssss)asasasasa(ss)b)`.
#[derive(Debug, Clone, Serialize, Type)]
pub(crate) struct ZoneSettingWire {
    pub version: String,
    pub short: String,
    pub description: String,
    pub unused: bool,
    pub target: String,
    pub services: Vec<String>,
    pub ports: Vec<(String, String)>,
    pub icmp_blocks: Vec<String>,
    pub masquerade: bool,
    pub forward_ports: Vec<(String, String, String, String)>,
    pub interfaces: Vec<String>,
    pub sources: Vec<String>,
    pub rich_rules: Vec<String>,
    pub protocols: Vec<String>,
    pub source_ports: Vec<(String, String)>,
    pub icmp_block_inversion: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Protocol;
    use pretty_assertions::assert_eq;

    #[test]
    fn zone_name_rejects_empty() {
        assert_eq!(ZoneName::new(""), Err(InvalidInput::EmptyZone));
        assert_eq!(ZoneName::new("   "), Err(InvalidInput::EmptyZone));
        assert_eq!(ZoneName::new("public").unwrap().as_str(), "public");
    }

    #[test]
    fn zone_name_deserializes_with_validation() {
        let zone: ZoneName = serde_json::from_str("\"dmz\"").unwrap();
        assert_eq!(zone.as_str(), "dmz");
        assert!(serde_json::from_str::<ZoneName>("\"\"").is_err());
    }

    #[test]
    fn wire_tuple_carries_defaults() {
        let setting = ZoneSetting {
            short: "lan".into(),
            services: vec!["ssh".into()],
            ports: vec![PortRule::new("8080", Protocol::Tcp).unwrap()],
            ..Default::default()
        };
        let wire = setting.to_wire();
        assert_eq!(wire.version, "");
        assert_eq!(wire.target, "default");
        assert!(!wire.unused);
        assert_eq!(wire.ports, vec![("8080".to_string(), "tcp".to_string())]);
        assert!(wire.forward_ports.is_empty());
    }

    #[test]
    fn wire_signature_matches_daemon() {
        assert_eq!(
            ZoneSettingWire::signature().as_str(),
            "(sssbsasa(ss)asba(ssss)asasasasa(ss)b)"
        );
    }
}
