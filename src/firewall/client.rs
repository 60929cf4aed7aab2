// Firewalld Gateway - Daemon Client
// SPDX-License-Identifier: MIT

//! Typed firewalld operations over a transport session.
//!
//! Runtime operations go to the daemon's root object; permanent operations
//! first resolve the zone's config object path via `config.getZoneByName`
//! and then talk to the `config.zone` interface on it. The two kinds of
//! state are never mixed: a permanent change only reaches runtime through
//! an explicit [`DaemonClient::reload`], which this client never issues on
//! its own.

use tracing::{debug, info, warn};
use zbus::zvariant::OwnedObjectPath;

use super::{interfaces, paths, Transport};
use crate::errors::DaemonError;
use crate::models::{PortRule, RichRule, ServiceName, ServiceSetting, ZoneName, ZoneSetting};

/// Stringly zone argument: the daemon reads an empty zone name as "the
/// default zone" on every runtime call.
fn zone_arg(zone: Option<&ZoneName>) -> &str {
    zone.map(ZoneName::as_str).unwrap_or("")
}

/// The daemon takes the TTL as a signed int; clamp rather than letting the
/// cast wrap huge values negative.
fn wire_ttl(ttl: u32) -> i32 {
    ttl.min(i32::MAX as u32) as i32
}

/// Client for one target's firewalld, borrowing the session that carries
/// its calls. No state beyond the borrow; construct one per request.
pub struct DaemonClient<'a, T: Transport> {
    transport: &'a T,
}

impl<'a, T: Transport> DaemonClient<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    async fn runtime_zone_call<B, R>(&self, method: &str, body: &B) -> Result<R, DaemonError>
    where
        B: serde::Serialize + zbus::zvariant::DynamicType + Send + Sync,
        R: serde::de::DeserializeOwned + zbus::zvariant::Type + Send,
    {
        self.transport
            .call(paths::ROOT, interfaces::ZONE, method, body)
            .await
    }

    /// Resolve the config object path for a zone's permanent settings.
    async fn zone_config_path(&self, zone: &ZoneName) -> Result<OwnedObjectPath, DaemonError> {
        self.transport
            .call(
                paths::CONFIG,
                interfaces::CONFIG,
                "getZoneByName",
                &(zone.as_str(),),
            )
            .await
    }

    async fn permanent_zone_call<B, R>(
        &self,
        zone: &ZoneName,
        method: &str,
        body: &B,
    ) -> Result<R, DaemonError>
    where
        B: serde::Serialize + zbus::zvariant::DynamicType + Send + Sync,
        R: serde::de::DeserializeOwned + zbus::zvariant::Type + Send,
    {
        let path = self.zone_config_path(zone).await?;
        self.transport
            .call(path.as_str(), interfaces::CONFIG_ZONE, method, body)
            .await
    }

    // --- services, runtime ---

    /// Services currently enabled in a zone (default zone when `None`).
    pub async fn services(&self, zone: Option<&ZoneName>) -> Result<Vec<String>, DaemonError> {
        debug!(zone = zone_arg(zone), "querying runtime services");
        self.runtime_zone_call("getServices", &(zone_arg(zone),)).await
    }

    /// Enable a service in a zone until the daemon reloads, or for `ttl`
    /// seconds when non-zero. The TTL is daemon-side rule expiry, not a
    /// call timeout.
    pub async fn add_service(
        &self,
        zone: Option<&ZoneName>,
        service: &ServiceName,
        ttl: u32,
    ) -> Result<(), DaemonError> {
        let _zone: String = self
            .runtime_zone_call("addService", &(zone_arg(zone), service.as_str(), wire_ttl(ttl)))
            .await?;
        info!(zone = zone_arg(zone), service = %service, ttl, "enabled service (runtime)");
        Ok(())
    }

    /// Disable a currently enabled service; the daemon faults if it is not
    /// enabled.
    pub async fn remove_service(
        &self,
        zone: Option<&ZoneName>,
        service: &ServiceName,
    ) -> Result<(), DaemonError> {
        let _zone: String = self
            .runtime_zone_call("removeService", &(zone_arg(zone), service.as_str()))
            .await?;
        info!(zone = zone_arg(zone), service = %service, "disabled service (runtime)");
        Ok(())
    }

    /// All service names the daemon knows, enabled anywhere or not.
    pub async fn available_services(&self) -> Result<Vec<String>, DaemonError> {
        debug!("listing available services");
        self.transport
            .call(paths::ROOT, interfaces::MAIN, "listServices", &())
            .await
    }

    // --- services, permanent ---

    pub async fn permanent_services(&self, zone: &ZoneName) -> Result<Vec<String>, DaemonError> {
        debug!(zone = %zone, "querying permanent services");
        self.permanent_zone_call(zone, "getServices", &()).await
    }

    pub async fn add_permanent_service(
        &self,
        zone: &ZoneName,
        service: &ServiceName,
    ) -> Result<(), DaemonError> {
        self.permanent_zone_call::<_, ()>(zone, "addService", &(service.as_str(),))
            .await?;
        info!(zone = %zone, service = %service, "enabled service (permanent)");
        Ok(())
    }

    pub async fn remove_permanent_service(
        &self,
        zone: &ZoneName,
        service: &ServiceName,
    ) -> Result<(), DaemonError> {
        self.permanent_zone_call::<_, ()>(zone, "removeService", &(service.as_str(),))
            .await?;
        info!(zone = %zone, service = %service, "disabled service (permanent)");
        Ok(())
    }

    /// Define a new permanent service. The daemon faults on a name
    /// collision; the setting is validated before anything goes out.
    pub async fn define_service(
        &self,
        name: &ServiceName,
        setting: &ServiceSetting,
    ) -> Result<(), DaemonError> {
        setting.validate()?;
        let _path: OwnedObjectPath = self
            .transport
            .call(
                paths::CONFIG,
                interfaces::CONFIG,
                "addService",
                &(name.as_str(), setting.to_wire()),
            )
            .await?;
        info!(service = %name, "defined new permanent service");
        Ok(())
    }

    // --- ports, runtime ---

    /// Ports open in a zone. The daemon answers `aas`, each inner array a
    /// `[port, protocol]` pair; entries that do not parse are dropped with
    /// a warning rather than failing the whole listing.
    pub async fn ports(&self, zone: Option<&ZoneName>) -> Result<Vec<PortRule>, DaemonError> {
        debug!(zone = zone_arg(zone), "querying runtime ports");
        let pairs: Vec<Vec<String>> =
            self.runtime_zone_call("getPorts", &(zone_arg(zone),)).await?;
        Ok(decode_port_pairs(
            pairs
                .into_iter()
                .filter(|pair| pair.len() >= 2)
                .map(|mut pair| (pair.remove(0), pair.remove(0))),
        ))
    }

    pub async fn add_port(
        &self,
        zone: Option<&ZoneName>,
        rule: &PortRule,
        ttl: u32,
    ) -> Result<(), DaemonError> {
        let _zone: String = self
            .runtime_zone_call(
                "addPort",
                &(zone_arg(zone), rule.port(), rule.protocol().as_str(), wire_ttl(ttl)),
            )
            .await?;
        info!(zone = zone_arg(zone), port = %rule, ttl, "opened port (runtime)");
        Ok(())
    }

    pub async fn remove_port(
        &self,
        zone: Option<&ZoneName>,
        rule: &PortRule,
    ) -> Result<(), DaemonError> {
        let _zone: String = self
            .runtime_zone_call(
                "removePort",
                &(zone_arg(zone), rule.port(), rule.protocol().as_str()),
            )
            .await?;
        info!(zone = zone_arg(zone), port = %rule, "closed port (runtime)");
        Ok(())
    }

    // --- ports, permanent ---

    /// Permanent config answers `a(ss)` here, unlike the runtime call.
    pub async fn permanent_ports(&self, zone: &ZoneName) -> Result<Vec<PortRule>, DaemonError> {
        debug!(zone = %zone, "querying permanent ports");
        let pairs: Vec<(String, String)> =
            self.permanent_zone_call(zone, "getPorts", &()).await?;
        Ok(decode_port_pairs(pairs.into_iter()))
    }

    pub async fn add_permanent_port(
        &self,
        zone: &ZoneName,
        rule: &PortRule,
    ) -> Result<(), DaemonError> {
        self.permanent_zone_call::<_, ()>(zone, "addPort", &(rule.port(), rule.protocol().as_str()))
            .await?;
        info!(zone = %zone, port = %rule, "opened port (permanent)");
        Ok(())
    }

    pub async fn remove_permanent_port(
        &self,
        zone: &ZoneName,
        rule: &PortRule,
    ) -> Result<(), DaemonError> {
        self.permanent_zone_call::<_, ()>(zone, "removePort", &(rule.port(), rule.protocol().as_str()))
            .await?;
        info!(zone = %zone, port = %rule, "closed port (permanent)");
        Ok(())
    }

    // --- zones ---

    pub async fn zones(&self) -> Result<Vec<String>, DaemonError> {
        debug!("listing zones");
        self.runtime_zone_call("getZones", &()).await
    }

    pub async fn default_zone(&self) -> Result<String, DaemonError> {
        self.transport
            .call(paths::ROOT, interfaces::MAIN, "getDefaultZone", &())
            .await
    }

    pub async fn set_default_zone(&self, zone: &ZoneName) -> Result<(), DaemonError> {
        self.transport
            .call::<_, ()>(paths::ROOT, interfaces::MAIN, "setDefaultZone", &(zone.as_str(),))
            .await?;
        info!(zone = %zone, "set default zone");
        Ok(())
    }

    /// Create a new permanent zone; takes effect at runtime after reload.
    pub async fn new_zone(
        &self,
        name: &ZoneName,
        setting: &ZoneSetting,
    ) -> Result<(), DaemonError> {
        let _path: OwnedObjectPath = self
            .transport
            .call(
                paths::CONFIG,
                interfaces::CONFIG,
                "addZone",
                &(name.as_str(), setting.to_wire()),
            )
            .await?;
        info!(zone = %name, "created permanent zone");
        Ok(())
    }

    /// Delete a permanent zone definition.
    pub async fn remove_zone(&self, zone: &ZoneName) -> Result<(), DaemonError> {
        self.permanent_zone_call::<_, ()>(zone, "remove", &()).await?;
        info!(zone = %zone, "removed permanent zone");
        Ok(())
    }

    // --- rich rules, runtime ---

    pub async fn rich_rules(&self, zone: Option<&ZoneName>) -> Result<Vec<String>, DaemonError> {
        debug!(zone = zone_arg(zone), "querying runtime rich rules");
        self.runtime_zone_call("getRichRules", &(zone_arg(zone),)).await
    }

    pub async fn add_rich_rule(
        &self,
        zone: Option<&ZoneName>,
        rule: &RichRule,
        ttl: u32,
    ) -> Result<(), DaemonError> {
        let _zone: String = self
            .runtime_zone_call("addRichRule", &(zone_arg(zone), rule.as_str(), wire_ttl(ttl)))
            .await?;
        info!(zone = zone_arg(zone), rule = %rule, ttl, "added rich rule (runtime)");
        Ok(())
    }

    pub async fn remove_rich_rule(
        &self,
        zone: Option<&ZoneName>,
        rule: &RichRule,
    ) -> Result<(), DaemonError> {
        let _zone: String = self
            .runtime_zone_call("removeRichRule", &(zone_arg(zone), rule.as_str()))
            .await?;
        info!(zone = zone_arg(zone), rule = %rule, "removed rich rule (runtime)");
        Ok(())
    }

    /// Whether a rich rule is currently active in a zone.
    pub async fn query_rich_rule(
        &self,
        zone: Option<&ZoneName>,
        rule: &RichRule,
    ) -> Result<bool, DaemonError> {
        self.runtime_zone_call("queryRichRule", &(zone_arg(zone), rule.as_str()))
            .await
    }

    // --- rich rules, permanent ---

    pub async fn permanent_rich_rules(&self, zone: &ZoneName) -> Result<Vec<String>, DaemonError> {
        debug!(zone = %zone, "querying permanent rich rules");
        self.permanent_zone_call(zone, "getRichRules", &()).await
    }

    pub async fn add_permanent_rich_rule(
        &self,
        zone: &ZoneName,
        rule: &RichRule,
    ) -> Result<(), DaemonError> {
        self.permanent_zone_call::<_, ()>(zone, "addRichRule", &(rule.as_str(),))
            .await?;
        info!(zone = %zone, rule = %rule, "added rich rule (permanent)");
        Ok(())
    }

    pub async fn remove_permanent_rich_rule(
        &self,
        zone: &ZoneName,
        rule: &RichRule,
    ) -> Result<(), DaemonError> {
        self.permanent_zone_call::<_, ()>(zone, "removeRichRule", &(rule.as_str(),))
            .await?;
        info!(zone = %zone, rule = %rule, "removed rich rule (permanent)");
        Ok(())
    }

    // --- daemon ---

    /// Reload the daemon: permanent configuration becomes runtime. Only
    /// ever called explicitly by a caller that asked for it.
    pub async fn reload(&self) -> Result<(), DaemonError> {
        self.transport
            .call::<_, ()>(paths::ROOT, interfaces::MAIN, "reload", &())
            .await?;
        info!("firewalld configuration reloaded");
        Ok(())
    }
}

fn decode_port_pairs(pairs: impl Iterator<Item = (String, String)>) -> Vec<PortRule> {
    pairs
        .filter_map(|(port, protocol)| {
            match protocol
                .parse()
                .and_then(|protocol| PortRule::new(port.clone(), protocol))
            {
                Ok(rule) => Some(rule),
                Err(err) => {
                    warn!(port = %port, protocol = %protocol, error = %err, "skipping undecodable port entry");
                    None
                }
            }
        })
        .collect()
}
