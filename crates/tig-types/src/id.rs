//! Platform identifiers for channels and users.
//!
//! Both are opaque strings issued by the chat platform (e.g. `C0123ABCD`,
//! `U0456EFGH`). They are kept as distinct newtypes so a channel can never be
//! passed where a user is expected.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Identifier of a monitored channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChannelId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_platform_id(s, "channel").map(Self)
    }
}

/// Identifier of a platform user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_platform_id(s, "user").map(Self)
    }
}

fn parse_platform_id(s: &str, kind: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(format!("{kind} id cannot be empty"));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(format!("invalid {kind} id: '{trimmed}'"));
    }
    Ok(trimmed.to_string())
}
