// Firewalld Gateway - Test Transport
// SPDX-License-Identifier: MIT

//! Fault-injecting transport for tests.
//!
//! Replies are queued up front as zvariant-encoded payloads, so the client
//! decodes them through the same deserialization path it uses for real bus
//! replies. Every call is recorded for assertions on routing and argument
//! signatures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use zbus::zvariant::serialized::{Context, Data};
use zbus::zvariant::{to_bytes, DynamicType, Type, LE};

use crate::errors::{DaemonError, RemoteFault};
use crate::firewall::Transport;

/// One recorded call: where it went and what the body looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub path: String,
    pub interface: String,
    pub method: String,
    pub body_signature: String,
}

enum CannedReply {
    Payload(Data<'static, 'static>),
    Error(DaemonError),
}

pub(crate) struct MockTransport {
    replies: Mutex<VecDeque<CannedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply.
    pub fn reply<V>(self, value: V) -> Self
    where
        V: Serialize + Type,
    {
        let data = to_bytes(Context::new_dbus(LE, 0), &value).expect("encode canned reply");
        self.replies
            .lock()
            .unwrap()
            .push_back(CannedReply::Payload(data));
        self
    }

    /// Queue a daemon fault.
    pub fn fault(self, code: &str, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(CannedReply::Error(DaemonError::Fault(RemoteFault {
                code: code.to_string(),
                message: message.to_string(),
            })));
        self
    }

    /// Queue a call timeout.
    pub fn timeout(self, method: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(CannedReply::Error(DaemonError::Timeout {
                method: method.to_string(),
                timeout: Duration::from_secs(5),
            }));
        self
    }

    /// Queue a dropped-connection error.
    pub fn disconnect(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(CannedReply::Error(DaemonError::Connection {
                target: "mock".to_string(),
                detail: "connection reset".to_string(),
            }));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

/// Session-shaped wrapper that counts how many times it is released, for
/// asserting that every exit path drops the session exactly once.
pub(crate) struct SpySession {
    inner: MockTransport,
    open: bool,
    releases: Arc<AtomicUsize>,
}

impl SpySession {
    pub fn new(inner: MockTransport) -> (Self, Arc<AtomicUsize>) {
        let releases = Arc::new(AtomicUsize::new(0));
        let session = Self {
            inner,
            open: true,
            releases: Arc::clone(&releases),
        };
        (session, releases)
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for SpySession {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl Transport for SpySession {
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
        self.inner.call(path, interface, method, body).await
    }
}

#[async_trait]
impl Transport for MockTransport {
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
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            interface: interface.to_string(),
            method: method.to_string(),
            body_signature: body.dynamic_signature().to_string(),
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no canned reply queued for {}", method));
        match reply {
            CannedReply::Payload(data) => {
                let (value, _) = data.deserialize().expect("canned reply type mismatch");
                Ok(value)
            }
            CannedReply::Error(err) => Err(err),
        }
    }
}
