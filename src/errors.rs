// Firewalld Gateway - Errors
// SPDX-License-Identifier: MIT

//! Error taxonomy for the daemon client core.
//!
//! Every failure a caller can observe falls into one of two classes:
//! connection-class errors (the bus could not be reached, or a call timed
//! out) and daemon faults (firewalld rejected the call). Daemon fault codes
//! are passed through opaquely; this crate never interprets them.

use std::time::Duration;

use thiserror::Error;

/// A fault returned by firewalld over the bus.
///
/// `code` is the D-Bus error name (e.g.
/// `org.fedoraproject.FirewallD1.Exception`), `message` the daemon's own
/// text (e.g. `ALREADY_ENABLED: 'ssh' already in 'public'`). Both are
/// surfaced unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct RemoteFault {
    pub code: String,
    pub message: String,
}

/// Errors produced by session handling and daemon calls.
#[derive(Debug, Clone, Error)]
pub enum DaemonError {
    /// The bus connection could not be opened, or was lost mid-call.
    #[error("cannot reach firewalld at {target}: {detail}")]
    Connection { target: String, detail: String },

    /// A call exceeded the session's call timeout.
    ///
    /// Distinct from the TTL argument of runtime add operations, which is a
    /// daemon-side rule expiry and never bounds the call itself.
    #[error("call to {method} timed out after {timeout:?}")]
    Timeout { method: String, timeout: Duration },

    /// firewalld rejected the call.
    #[error("firewalld rejected the call: {0}")]
    Fault(#[from] RemoteFault),

    /// A value failed client-side validation; nothing was sent to the
    /// daemon.
    #[error("invalid input: {0}")]
    Invalid(#[from] InvalidInput),
}

impl DaemonError {
    /// Connection-class errors cover both open failures and timeouts; the
    /// HTTP layer maps them to its "cannot reach daemon" response class.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
    }

    /// True for daemon rejections, the "operation rejected" response class.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }

    /// The fault payload, if this is a daemon rejection.
    pub fn fault(&self) -> Option<&RemoteFault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Classify a zbus error for a call against `target`.
    ///
    /// A `MethodError` is the daemon answering with a fault; everything else
    /// (I/O errors, serialization trouble, a closed connection) means the
    /// bus path itself failed.
    pub(crate) fn from_call_error(target: &str, err: zbus::Error) -> Self {
        match err {
            zbus::Error::MethodError(code, message, _) => Self::Fault(RemoteFault {
                code: code.to_string(),
                message: message.unwrap_or_default(),
            }),
            other => Self::Connection {
                target: target.to_string(),
                detail: other.to_string(),
            },
        }
    }
}

/// Validation failures raised by model constructors, before anything is
/// sent over the bus. The daemon remains the final authority on existence;
/// these only reject values that could never be valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("zone name must not be empty")]
    EmptyZone,

    #[error("service name must not be empty")]
    EmptyService,

    #[error("rich rule must not be empty")]
    EmptyRule,

    #[error("target host must not be empty")]
    EmptyHost,

    #[error("invalid target host {0:?}")]
    BadHost(String),

    #[error("invalid port {0:?}: expected a port number or range like 8000-8010")]
    BadPort(String),

    #[error("unknown protocol {0:?}")]
    BadProtocol(String),

    #[error("service setting must declare at least one port, protocol, or module")]
    EmptySetting,
}
