// Firewalld Gateway - Bus Transport
// SPDX-License-Identifier: MIT

//! Transport session: one bus connection per logical operation.
//!
//! A [`BusSession`] is opened for a single request, used for one call (or a
//! short same-target sequence) and released. Release is tied to `Drop`, so
//! every exit path of a caller gives the connection back; explicit
//! [`BusSession::close`] is idempotent on top of that.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use zbus::zvariant::{DynamicType, Type};
use zbus::{AuthMechanism, Connection};

use super::BUS_NAME;
use crate::errors::{DaemonError, InvalidInput};

/// Port firewalld-gateway expects a remote host's D-Bus TCP listener on.
pub const DEFAULT_REMOTE_PORT: u16 = 55557;

const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Host the session connects to: the local system bus, or a remote host's
/// D-Bus listener over TCP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local,
    Remote { host: String, port: Option<u16> },
}

impl Target {
    /// Parse a request's host string. Empty and loopback values mean the
    /// local system bus; anything else is a remote host, with an optional
    /// `host:port` override.
    pub fn parse(host: &str) -> Result<Self, InvalidInput> {
        let host = host.trim();
        if host.is_empty() {
            return Err(InvalidInput::EmptyHost);
        }
        if matches!(host, "localhost" | "127.0.0.1" | "::1") {
            return Ok(Self::Local);
        }
        // Bracketed IPv6, with or without a port: "[fe80::1]:5567".
        if let Some(rest) = host.strip_prefix('[') {
            let (addr, trail) = rest
                .split_once(']')
                .ok_or_else(|| InvalidInput::BadHost(host.to_string()))?;
            if addr.is_empty() {
                return Err(InvalidInput::BadHost(host.to_string()));
            }
            let port = match trail.strip_prefix(':') {
                Some(port) => Some(
                    port.parse::<u16>()
                        .map_err(|_| InvalidInput::BadHost(host.to_string()))?,
                ),
                None if trail.is_empty() => None,
                None => return Err(InvalidInput::BadHost(host.to_string())),
            };
            return Ok(Self::Remote {
                host: addr.to_string(),
                port,
            });
        }
        // A bare IPv6 literal has more than one colon; it is all host, no
        // port. Splitting it on the last colon would mangle the address.
        if host.matches(':').count() > 1 {
            return Ok(Self::Remote {
                host: host.to_string(),
                port: None,
            });
        }
        if let Some((name, port)) = host.rsplit_once(':') {
            if let Ok(port) = port.parse::<u16>() {
                if name.is_empty() {
                    return Err(InvalidInput::EmptyHost);
                }
                return Ok(Self::Remote {
                    host: name.to_string(),
                    port: Some(port),
                });
            }
        }
        Ok(Self::Remote {
            host: host.to_string(),
            port: None,
        })
    }

    pub fn local() -> Self {
        Self::Local
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("localhost"),
            Self::Remote { host, port } => {
                let port = port.unwrap_or(DEFAULT_REMOTE_PORT);
                if host.contains(':') {
                    write!(f, "[{}]:{}", host, port)
                } else {
                    write!(f, "{}:{}", host, port)
                }
            }
        }
    }
}

/// Knobs for a session. The call timeout bounds each bus round trip and the
/// connection attempt itself; it is unrelated to the TTL accepted by
/// runtime add operations, which is daemon-side rule expiry.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub call_timeout: Duration,
    pub remote_port: u16,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            call_timeout: DEFAULT_CALL_TIMEOUT,
            remote_port: DEFAULT_REMOTE_PORT,
        }
    }
}

/// One bus round trip against firewalld.
///
/// The seam the client is generic over, so tests can substitute a
/// fault-injecting transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call<B, R>(
        &self,
        path: &str,
        interface: &str,
        method: &str,
        body: &B,
    ) -> Result<R, DaemonError>
    where
        B: Serialize + DynamicType + Send + Sync,
        R: DeserializeOwned + Type + Send;
}

/// A live connection to a target's firewalld, scoped to one request.
#[derive(Debug)]
pub struct BusSession {
    connection: Option<Connection>,
    target: String,
    call_timeout: Duration,
}

impl BusSession {
    /// Open a connection to the target's bus. Unreachable or invalid
    /// targets yield a connection-class error; nothing is retried.
    pub async fn open(target: &Target, options: &SessionOptions) -> Result<Self, DaemonError> {
        let label = target.to_string();
        let connect = async {
            match target {
                Target::Local => Connection::system().await,
                Target::Remote { host, port } => {
                    let address = format!(
                        "tcp:host={},port={}",
                        host,
                        port.unwrap_or(options.remote_port)
                    );
                    zbus::connection::Builder::address(address.as_str())?
                        .auth_mechanism(AuthMechanism::Anonymous)
                        .build()
                        .await
                }
            }
        };

        let connection = tokio::time::timeout(options.call_timeout, connect)
            .await
            .map_err(|_| DaemonError::Connection {
                target: label.clone(),
                detail: "connection attempt timed out".to_string(),
            })?
            .map_err(|err| DaemonError::Connection {
                target: label.clone(),
                detail: err.to_string(),
            })?;

        debug!(target = %label, "bus session opened");
        Ok(Self {
            connection: Some(connection),
            target: label,
            call_timeout: options.call_timeout,
        })
    }

    /// Release the connection. Safe to call more than once; `Drop` calls it
    /// too, so a session never outlives the request that opened it.
    pub fn close(&mut self) {
        if self.connection.take().is_some() {
            debug!(target = %self.target, "bus session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.connection.is_none()
    }

    /// The target this session is bound to, in display form.
    pub fn target(&self) -> &str {
        &self.target
    }

    fn connection(&self) -> Result<&Connection, DaemonError> {
        self.connection.as_ref().ok_or_else(|| DaemonError::Connection {
            target: self.target.clone(),
            detail: "session is closed".to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn detached(target: &str) -> Self {
        Self {
            connection: None,
            target: target.to_string(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

impl Drop for BusSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl Transport for BusSession {
    async fn call<B, R>(
        &self,
        path: &str,
        interface: &str,
        method: &str,
        body: &B,
    ) -> Result<R, DaemonError>
    where
        B: Serialize + DynamicType + Send + Sync,
        R: DeserializeOwned + Type + Send,
    {
        let connection = self.connection()?;

        let call = connection.call_method(Some(BUS_NAME), path, Some(interface), method, body);
        let reply = tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| DaemonError::Timeout {
                method: method.to_string(),
                timeout: self.call_timeout,
            })?
            .map_err(|err| DaemonError::from_call_error(&self.target, err))?;

        reply
            .body()
            .deserialize()
            .map_err(|err| DaemonError::Connection {
                target: self.target.clone(),
                detail: format!("malformed reply to {}: {}", method, err),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_distinguishes_local_and_remote() {
        assert_eq!(Target::parse("localhost").unwrap(), Target::Local);
        assert_eq!(Target::parse("127.0.0.1").unwrap(), Target::Local);
        assert_eq!(
            Target::parse("192.168.1.10").unwrap(),
            Target::Remote {
                host: "192.168.1.10".to_string(),
                port: None,
            }
        );
        assert_eq!(
            Target::parse("192.168.1.10:5567").unwrap(),
            Target::Remote {
                host: "192.168.1.10".to_string(),
                port: Some(5567),
            }
        );
    }

    #[test]
    fn parse_handles_ipv6_literals() {
        assert_eq!(
            Target::parse("fe80::1").unwrap(),
            Target::Remote {
                host: "fe80::1".to_string(),
                port: None,
            }
        );
        assert_eq!(
            Target::parse("[fe80::1]:5567").unwrap(),
            Target::Remote {
                host: "fe80::1".to_string(),
                port: Some(5567),
            }
        );
        assert_eq!(
            Target::parse("[fe80::1]").unwrap(),
            Target::Remote {
                host: "fe80::1".to_string(),
                port: None,
            }
        );
        assert!(Target::parse("[fe80::1").is_err());
        assert!(Target::parse("[fe80::1]x").is_err());
        assert!(Target::parse("[]:80").is_err());
    }

    #[test]
    fn ipv6_display_brackets_the_host() {
        assert_eq!(
            Target::parse("fe80::1").unwrap().to_string(),
            "[fe80::1]:55557"
        );
        assert_eq!(
            Target::parse("[fe80::1]:5567").unwrap().to_string(),
            "[fe80::1]:5567"
        );
    }

    #[test]
    fn parse_rejects_empty_hosts() {
        assert_eq!(Target::parse(""), Err(InvalidInput::EmptyHost));
        assert_eq!(Target::parse("  "), Err(InvalidInput::EmptyHost));
        assert_eq!(Target::parse(":5567"), Err(InvalidInput::EmptyHost));
    }

    #[test]
    fn display_fills_in_default_port() {
        assert_eq!(
            Target::parse("192.168.1.10").unwrap().to_string(),
            "192.168.1.10:55557"
        );
        assert_eq!(Target::local().to_string(), "localhost");
    }

    #[test]
    fn session_state_is_debuggable() {
        // Error paths format sessions and their results with `{:?}`.
        let session = BusSession::detached("192.168.1.10:55557");
        let repr = format!("{session:?}");
        assert!(repr.contains("192.168.1.10"));
    }

    #[test]
    fn close_is_idempotent() {
        let mut session = BusSession::detached("localhost");
        session.close();
        session.close();
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn call_on_closed_session_is_a_connection_error() {
        let session = BusSession::detached("localhost");
        let result: Result<Vec<String>, _> = session
            .call(super::super::paths::ROOT, super::super::interfaces::ZONE, "getServices", &("",))
            .await;
        let err = result.unwrap_err();
        assert!(err.is_connection(), "expected connection class, got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_target_fails_to_open() {
        // Nothing listens on port 1; the connection attempt must come back
        // as a connection-class error, bounded by the timeout.
        let target = Target::Remote {
            host: "127.0.0.1".to_string(),
            port: Some(1),
        };
        let options = SessionOptions {
            call_timeout: Duration::from_secs(2),
            ..Default::default()
        };
        let err = BusSession::open(&target, &options).await.unwrap_err();
        assert!(err.is_connection(), "expected connection class, got {err:?}");
    }
}
