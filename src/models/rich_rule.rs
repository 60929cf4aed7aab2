// Firewalld Gateway - Rich Rule Model
// SPDX-License-Identifier: MIT

//! Rich rule expressions.
//!
//! A rich rule is carried over the bus as rich-language text. Callers can
//! supply the text directly (`RichRule::raw`) or assemble it from parts
//! with the builder, which renders the attributes in the daemon's
//! canonical order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::InvalidInput;
use crate::models::PortRule;

/// Address family of a rich rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFamily {
    Ipv4,
    Ipv6,
}

impl RuleFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
        }
    }
}

/// Terminal action of a rich rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    #[default]
    Accept,
    Reject,
    Drop,
}

impl RuleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Drop => "drop",
        }
    }
}

/// A rich rule in its rich-language text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RichRule(String);

impl RichRule {
    /// Wrap an already-rendered rule string.
    pub fn raw(rule: impl Into<String>) -> Result<Self, InvalidInput> {
        let rule = rule.into();
        if rule.trim().is_empty() {
            return Err(InvalidInput::EmptyRule);
        }
        Ok(Self(rule))
    }

    pub fn builder() -> RichRuleBuilder {
        RichRuleBuilder::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RichRule {
    type Error = InvalidInput;

    fn try_from(rule: String) -> Result<Self, Self::Error> {
        Self::raw(rule)
    }
}

impl From<RichRule> for String {
    fn from(rule: RichRule) -> Self {
        rule.0
    }
}

impl fmt::Display for RichRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a rich rule from structured parts.
#[derive(Debug, Clone, Default)]
pub struct RichRuleBuilder {
    family: Option<RuleFamily>,
    source: Option<String>,
    source_inverted: bool,
    destination: Option<String>,
    service: Option<String>,
    port: Option<PortRule>,
    log_prefix: Option<String>,
    audit: bool,
    action: RuleAction,
}

impl RichRuleBuilder {
    pub fn family(mut self, family: RuleFamily) -> Self {
        self.family = Some(family);
        self
    }

    /// Match packets from this source address or CIDR block.
    pub fn source(mut self, address: impl Into<String>) -> Self {
        self.source = Some(address.into());
        self
    }

    /// Invert the source match.
    pub fn source_inverted(mut self, inverted: bool) -> Self {
        self.source_inverted = inverted;
        self
    }

    pub fn destination(mut self, address: impl Into<String>) -> Self {
        self.destination = Some(address.into());
        self
    }

    pub fn service(mut self, name: impl Into<String>) -> Self {
        self.service = Some(name.into());
        self
    }

    pub fn port(mut self, port: PortRule) -> Self {
        self.port = Some(port);
        self
    }

    /// Log matches with the given prefix.
    pub fn log(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = Some(prefix.into());
        self
    }

    pub fn audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    pub fn action(mut self, action: RuleAction) -> Self {
        self.action = action;
        self
    }

    /// Render the rule. A rule must match on something; a bare action is
    /// rejected.
    pub fn build(self) -> Result<RichRule, InvalidInput> {
        if self.source.is_none()
            && self.destination.is_none()
            && self.service.is_none()
            && self.port.is_none()
        {
            return Err(InvalidInput::EmptyRule);
        }

        let mut rule = String::from("rule");
        if let Some(family) = self.family {
            rule.push_str(&format!(" family=\"{}\"", family.as_str()));
        }
        if let Some(source) = &self.source {
            rule.push_str(&format!(" source address=\"{}\"", source));
            if self.source_inverted {
                rule.push_str(" invert=\"True\"");
            }
        }
        if let Some(destination) = &self.destination {
            rule.push_str(&format!(" destination address=\"{}\"", destination));
        }
        if let Some(service) = &self.service {
            rule.push_str(&format!(" service name=\"{}\"", service));
        }
        if let Some(port) = &self.port {
            rule.push_str(&format!(
                " port port=\"{}\" protocol=\"{}\"",
                port.port(),
                port.protocol()
            ));
        }
        if let Some(prefix) = &self.log_prefix {
            rule.push_str(&format!(" log prefix=\"{}\"", prefix));
        }
        if self.audit {
            rule.push_str(" audit");
        }
        rule.push(' ');
        rule.push_str(self.action.as_str());

        Ok(RichRule(rule))
    }
}
