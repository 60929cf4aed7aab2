// Firewalld Gateway - Operation Facade
// SPDX-License-Identifier: MIT

//! One function per (resource kind, operation).
//!
//! Each function opens a session for its target, performs one client
//! operation, and returns. The session is a local dropped on every exit
//! path, so release is guaranteed whether the call succeeds, faults, or
//! never happens because the open failed.
//!
//! List results come back as a [`Lookup`]: a successful call that returns
//! nothing is a distinguished "nothing found" outcome, not an error. This
//! preserves the gateway's observable behavior even though an empty zone
//! is a legitimate state.

pub mod daemon;
pub mod ports;
pub mod rich_rules;
pub mod services;
pub mod zones;

use crate::firewall::{BusSession, SessionOptions, Target};
use crate::errors::DaemonError;

/// Result of a list operation: items, or the daemon reported none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(Vec<T>),
    Empty,
}

impl<T> Lookup<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Found(items)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The items, with `Empty` flattened to an empty vector.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Found(items) => items,
            Self::Empty => Vec::new(),
        }
    }
}

pub(crate) async fn session_for(target: &Target) -> Result<BusSession, DaemonError> {
    BusSession::open(target, &SessionOptions::default()).await
}
