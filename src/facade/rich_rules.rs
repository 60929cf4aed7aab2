// Firewalld Gateway - Rich Rule Operations
// SPDX-License-Identifier: MIT

//! Rich rule operations within a zone, runtime or permanent.

use super::{session_for, Lookup};
use crate::errors::DaemonError;
use crate::firewall::{DaemonClient, Target};
use crate::models::{RichRule, ZoneName};

/// Rich rules active in a zone, as the daemon renders them.
pub async fn get_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
) -> Result<Lookup<String>, DaemonError> {
    let session = session_for(target).await?;
    let rules = DaemonClient::new(&session).rich_rules(zone).await?;
    Ok(Lookup::from_items(rules))
}

pub async fn add_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
    rule: &RichRule,
    ttl: u32,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).add_rich_rule(zone, rule, ttl).await
}

pub async fn remove_runtime(
    target: &Target,
    zone: Option<&ZoneName>,
    rule: &RichRule,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).remove_rich_rule(zone, rule).await
}

/// Whether the rule is currently active in the zone.
pub async fn query(
    target: &Target,
    zone: Option<&ZoneName>,
    rule: &RichRule,
) -> Result<bool, DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).query_rich_rule(zone, rule).await
}

/// Rich rules in a zone's permanent configuration.
pub async fn get_permanent(
    target: &Target,
    zone: &ZoneName,
) -> Result<Lookup<String>, DaemonError> {
    let session = session_for(target).await?;
    let rules = DaemonClient::new(&session).permanent_rich_rules(zone).await?;
    Ok(Lookup::from_items(rules))
}

pub async fn add_permanent(
    target: &Target,
    zone: &ZoneName,
    rule: &RichRule,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).add_permanent_rich_rule(zone, rule).await
}

pub async fn remove_permanent(
    target: &Target,
    zone: &ZoneName,
    rule: &RichRule,
) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).remove_permanent_rich_rule(zone, rule).await
}
