// Firewalld Gateway - Daemon Operations
// SPDX-License-Identifier: MIT

//! Daemon-level operations.

use super::session_for;
use crate::errors::DaemonError;
use crate::firewall::{DaemonClient, Target};

/// Reload firewalld: permanent configuration becomes the runtime
/// configuration. This is the only way a permanent change takes effect,
/// and it only ever happens because a caller asked for it.
pub async fn reload(target: &Target) -> Result<(), DaemonError> {
    let session = session_for(target).await?;
    DaemonClient::new(&session).reload().await
}
