//! Alert routing records.
//!
//! An `AlertRoute` remembers which user asked to be alerted for a channel.
//! Records are append-only: one is written per setup invocation, none are
//! updated or deleted, and several may point at the same channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::id::{ChannelId, UserId};

/// Unique identifier for an alert route, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertRouteId(pub Uuid);

impl AlertRouteId {
    /// Create a fresh identifier using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AlertRouteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlertRouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AlertRouteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Maps a monitored channel to the user who should be notified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRoute {
    pub id: AlertRouteId,
    pub channel: ChannelId,
    /// Absent when the setup request carried no user.
    pub user_to_alert: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl AlertRoute {
    /// Build a new record with a freshly generated id.
    pub fn new(channel: ChannelId, user_to_alert: Option<UserId>) -> Self {
        Self {
            id: AlertRouteId::new(),
            channel,
            user_to_alert,
            created_at: Utc::now(),
        }
    }
}
