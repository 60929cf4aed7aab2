// Firewalld Gateway - Service Model
// SPDX-License-Identifier: MIT

//! Firewall service name and permanent service definition.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use zbus::zvariant::Type;

use crate::errors::InvalidInput;
use crate::models::{PortRule, Protocol};

/// A firewall service name, e.g. "ssh" or "https".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidInput> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidInput::EmptyService);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceName {
    type Error = InvalidInput;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<ServiceName> for String {
    fn from(service: ServiceName) -> Self {
        service.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Definition of a new permanent service.
///
/// Defining a service makes it known to the daemon; enabling it in a zone
/// is a separate operation. A definition must describe at least one port,
/// protocol, or helper module to be worth anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceSetting {
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ports: Vec<PortRule>,
    #[serde(default)]
    pub modules: Vec<String>,
    /// Destination addresses keyed by family ("ipv4"/"ipv6").
    #[serde(default)]
    pub destinations: HashMap<String, String>,
    #[serde(default)]
    pub protocols: Vec<Protocol>,
    #[serde(default)]
    pub source_ports: Vec<PortRule>,
}

impl ServiceSetting {
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.ports.is_empty() && self.protocols.is_empty() && self.modules.is_empty() {
            return Err(InvalidInput::EmptySetting);
        }
        Ok(())
    }

    pub(crate) fn to_wire(&self) -> ServiceSettingWire {
        ServiceSettingWire {
            version: String::new(),
            short: self.short.clone(),
            description: self.description.clone(),
            ports: self.ports.iter().map(PortRule::to_pair).collect(),
            modules: self.modules.clone(),
            destinations: self.destinations.clone(),
            protocols: self.protocols.iter().map(|p| p.as_str().to_string()).collect(),
            source_ports: self.source_ports.iter().map(PortRule::to_pair).collect(),
        }
    }
}

/// The daemon's service settings tuple, `(sssa(ss)asa{ss}asa(ss))`.
#[derive(Debug, Clone, Serialize, Type)]
pub(crate) struct ServiceSettingWire {
    pub version: String,
    pub short: String,
    pub description: String,
    pub ports: Vec<(String, String)>,
    pub modules: Vec<String>,
    pub destinations: HashMap<String, String>,
    pub protocols: Vec<String>,
    pub source_ports: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn service_name_rejects_empty() {
        assert_eq!(ServiceName::new(""), Err(InvalidInput::EmptyService));
        assert_eq!(ServiceName::new("ssh").unwrap().as_str(), "ssh");
    }

    #[test]
    fn empty_setting_is_rejected() {
        let setting = ServiceSetting::default();
        assert_eq!(setting.validate(), Err(InvalidInput::EmptySetting));

        let setting = ServiceSetting {
            ports: vec![PortRule::new("9999", Protocol::Tcp).unwrap()],
            ..Default::default()
        };
        assert_eq!(setting.validate(), Ok(()));
    }

    #[test]
    fn setting_decodes_from_json() {
        let setting: ServiceSetting = serde_json::from_str(
            r#"{"short":"custom1","ports":[{"port":"9999","protocol":"tcp"}]}"#,
        )
        .unwrap();
        assert_eq!(setting.validate(), Ok(()));
        let wire = setting.to_wire();
        assert_eq!(wire.ports, vec![("9999".to_string(), "tcp".to_string())]);
        assert_eq!(wire.version, "");
    }

    #[test]
    fn wire_signature_matches_daemon() {
        assert_eq!(
            ServiceSettingWire::signature().as_str(),
            "(sssa(ss)asa{ss}asa(ss))"
        );
    }
}
