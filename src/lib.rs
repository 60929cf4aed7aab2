// Firewalld Gateway - Library Root
// SPDX-License-Identifier: MIT

//! Daemon client core for a firewalld HTTP gateway.
//!
//! This crate talks to firewalld over D-Bus: it opens one bus session per
//! request (the local system bus, or a remote host's D-Bus TCP listener),
//! issues typed method calls against the daemon's interfaces, and maps
//! every failure into a small stable taxonomy
//! ([`DaemonError`]).
//!
//! Runtime and permanent configuration are kept strictly apart. Runtime
//! changes are live immediately and lost on reload; permanent changes are
//! persisted and only reach runtime through an explicit
//! [`facade::daemon::reload`].
//!
//! The [`facade`] module is the intended entry point for an HTTP routing
//! layer: one async function per operation, each handing back either a
//! payload, a distinguished [`Lookup::Empty`], or a [`DaemonError`].
//!
//! ```no_run
//! use firewalld_gateway::facade::services;
//! use firewalld_gateway::models::{ServiceName, ZoneName};
//! use firewalld_gateway::Target;
//!
//! # async fn demo() -> Result<(), firewalld_gateway::DaemonError> {
//! let target = Target::parse("192.168.1.10").unwrap();
//! let zone = ZoneName::new("public").unwrap();
//! let ssh = ServiceName::new("ssh").unwrap();
//!
//! services::add_runtime(&target, Some(&zone), &ssh, 0).await?;
//! let enabled = services::get_runtime(&target, Some(&zone)).await?;
//! assert!(enabled.into_items().iter().any(|s| s == "ssh"));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod facade;
pub mod firewall;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{DaemonError, InvalidInput, RemoteFault};
pub use facade::Lookup;
pub use firewall::{BusSession, DaemonClient, SessionOptions, Target, Transport};
