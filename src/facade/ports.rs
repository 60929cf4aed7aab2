// Firewalld Gateway - Port Operations
// SPDX-License-Identifier: MIT

//! Port operations: open/close explicit (port, protocol) rules in a zone,
//! runtime or permanent.

use super::{session_for, Lookup};
use crate::errors::DaemonError;
use crate::firewall::{DaemonClient, Target};
use crate::models::{PortRule, ZoneName};

/// Ports open in a zone right now (default zone when `None`).
pub async fn get_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
) -> Result<Lookup<PortRule>, DaemonError> {
    let session = session_for(target).await?;
    let ports = DaemonClient::new(&session).ports(zone).await?;
    Ok(Lookup::from_items(ports))
}

pub async fn add_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
    rule: &PortRule,
    ttl: u32,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).add_port(zone, rule, ttl).await
}

pub async fn remove_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
    rule: &PortRule,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).remove_port(zone, rule).await
}

/// Ports in a zone's permanent configuration.
pub async fn get_permanent(
    target: &Target,
    zone: &ZoneName,
) -> Result<Lookup<PortRule>, DaemonError> {
    let session = session_for(target).await?;
    let ports = DaemonClient::new(&session).permanent_ports(zone).await?;
    Ok(Lookup::from_items(ports))
}

pub async fn add_permanent(
    target: &Target,
    zone: &ZoneName,
    rule: &PortRule,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).add_permanent_port(zone, rule).await
}

pub async fn remove_permanent(
    target: &Target,
    zone: &ZoneName,
    rule: &PortRule,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).remove_permanent_port(zone, rule).await
}
