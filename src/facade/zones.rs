// Firewalld Gateway - Zone Operations
// SPDX-License-Identifier: MIT

//! Zone operations: enumerate zones, read and move the default zone,
//! create and delete permanent zone definitions.

use super::{session_for, Lookup};
use crate::errors::DaemonError;
use crate::firewall::{DaemonClient, Target};
use crate::models::{ZoneName, ZoneSetting};

/// All zone names the daemon knows.
pub async fn list(target: &Target) -> Result<Lookup<String>, DaemonError> {
    let session = session_for(target).await?;
    let zones = DaemonClient::new(&session).zones().await?;
    Ok(Lookup::from_items(zones))
}

pub async fn get_default(target: &Target) -> Result<String, DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).default_zone().await
}

pub async fn set_default(target: &Target, zone: &ZoneName) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).set_default_zone(zone).await
}

/// Create a permanent zone; visible at runtime only after an explicit
/// reload.
pub async fn create(
    target: &Target,
    name: &ZoneName,
    setting: &ZoneSetting,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).new_zone(name, setting).await
}

/// Delete a permanent zone definition.
pub async fn delete(target: &Target, zone: &ZoneName) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).remove_zone(zone).await
}
