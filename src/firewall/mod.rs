// Firewalld Gateway - Firewall Module
// SPDX-License-Identifier: MIT

//! Firewalld bus identifiers, transport session and typed daemon client.

pub mod client;
pub mod transport;

pub use client::DaemonClient;
pub use transport::{BusSession, SessionOptions, Target, Transport};

/// D-Bus bus name for firewalld.
pub const BUS_NAME: &str = "org.fedoraproject.FirewallD1";

/// D-Bus object paths.
pub mod paths {
    pub const ROOT: &str = "/org/fedoraproject/FirewallD1";
    pub const CONFIG: &str = "/org/fedoraproject/FirewallD1/config";
}

/// D-Bus interface names.
pub mod interfaces {
    /// Main firewalld interface (listServices, getDefaultZone, reload, ...).
    pub const MAIN: &str = "org.fedoraproject.FirewallD1";
    /// Zone interface, runtime configuration.
    pub const ZONE: &str = "org.fedoraproject.FirewallD1.zone";
    /// Top-level permanent configuration interface.
    pub const CONFIG: &str = "org.fedoraproject.FirewallD1.config";
    /// Per-zone permanent configuration interface.
    pub const CONFIG_ZONE: &str = "org.fedoraproject.FirewallD1.config.zone";
}
