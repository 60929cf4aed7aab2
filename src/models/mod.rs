// Firewalld Gateway - Models
// SPDX-License-Identifier: MIT

//! Validated value types for firewall entities.
//!
//! Identifiers are newtypes whose constructors reject values that could
//! never be valid (empty names, malformed ports). Existence checks stay
//! with the daemon.

mod port;
mod rich_rule;
mod service;
mod zone;

pub use port::{PortRule, Protocol};
pub use rich_rule::{RichRule, RichRuleBuilder, RuleAction, RuleFamily};
pub use service::{ServiceName, ServiceSetting};
pub use zone::{ZoneName, ZoneSetting};
