// Firewalld Gateway - Service Operations
// SPDX-License-Identifier: MIT

//! Service operations: enable/disable in a zone (runtime or permanent),
//! list what is enabled or available, define new permanent services.

use super::{session_for, Lookup};
use crate::errors::DaemonError;
use crate::firewall::{DaemonClient, Target, Transport};
use crate::models::{ServiceName, ServiceSetting, ZoneName};

/// Services enabled in a zone right now (default zone when `None`).
pub async fn get_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
) -> Result<Lookup<String>, DaemonError> {
    let session = session_for(target).await?;
    fetch_runtime(session, zone).await
}

// Takes the session by value so every exit path, error or not, drops it
// before the caller sees the result.
async fn fetch_runtime<T: Transport>(
    session: T,
    zone: Option<&ZoneName>,
) -> Result<Lookup<String>, DaemonError> {
    let services = DaemonClient::new(&session).services(zone).await?;
    Ok(Lookup::from_items(services))
}

/// Enable a service in a zone until reload, or for `ttl` seconds when
/// non-zero.
pub async fn add_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
    service: &ServiceName,
    ttl: u32,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    enable_runtime(session, zone, service, ttl).await
}

async fn enable_runtime<T: Transport>(
    session: T,
    zone: Option<&ZoneName>,
    service: &ServiceName,
    ttl: u32,
) -> Result<(), DaemonError> {
    DaemonClient::new(&session).add_service(zone, service, ttl).await
}

/// Disable a currently enabled service.
pub async fn remove_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
    service: &ServiceName,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).remove_service(zone, service).await
}

/// Every service name the daemon knows about.
pub async fn list_available(target: &Target) -> Result<Lookup<String>, DaemonError> {
    let session = session_for(target).await?;
    let services = DaemonClient::new(&session).available_services().await?;
    Ok(Lookup::from_items(services))
}

/// Services in a zone's permanent configuration.
pub async fn get_permanent(
    target: &Target,
    zone: &ZoneName,
) -> Result<Lookup<String>, DaemonError> {
    let session = session_for(target).await?;
    let services = DaemonClient::new(&session).permanent_services(zone).await?;
    Ok(Lookup::from_items(services))
}

pub async fn add_permanent(
    target: &Target,
    zone: &ZoneName,
    service: &ServiceName,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).add_permanent_service(zone, service).await
}

pub async fn remove_permanent(
    target: &Target,
    zone: &ZoneName,
    service: &ServiceName,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).remove_permanent_service(zone, service).await
}

/// Define a new permanent service from a validated setting. Defining does
/// not enable it anywhere.
pub async fn define_permanent(
    target: &Target,
    name: &ServiceName,
    setting: &ServiceSetting,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).define_service(name, setting).await
}
