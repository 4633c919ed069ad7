//! Watch types.
//!
//! A watch is a standing subscription held by the chat platform: "invoke
//! this workflow when this kind of event happens in these channels". The
//! advisor only lists and creates watches; the platform owns their lifecycle.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::ChannelId;

/// Platform event kinds a watch can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// A message was posted in one of the watched channels.
    MessagePosted,
    /// A user joined one of the watched channels.
    UserJoinedChannel,
    /// Any event type the advisor does not interpret.
    Other(String),
}

impl EventType {
    /// The platform's wire name for this event type.
    pub fn as_str(&self) -> &str {
        match self {
            EventType::MessagePosted => "slack#/events/message_posted",
            EventType::UserJoinedChannel => "slack#/events/user_joined_channel",
            EventType::Other(raw) => raw,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "slack#/events/message_posted" => EventType::MessagePosted,
            "slack#/events/user_joined_channel" => EventType::UserJoinedChannel,
            _ => EventType::Other(s),
        }
    }
}

impl From<EventType> for String {
    fn from(e: EventType) -> Self {
        e.as_str().to_string()
    }
}

/// Value supplied to a workflow input when a watch fires.
///
/// Either a literal fixed at creation time or a platform template such as
/// `{{data.user_id}}` that is resolved against the triggering event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBinding {
    pub value: String,
}

impl InputBinding {
    /// A literal value baked into the watch.
    pub fn fixed(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// A reference to a field of the triggering event's data.
    pub fn event_data(field: &str) -> Self {
        Self {
            value: format!("{{{{data.{field}}}}}"),
        }
    }
}

/// A watch as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watch {
    /// Platform-assigned watch identifier.
    pub id: String,
    pub name: String,
    /// Callback id of the workflow the watch invokes.
    pub target_workflow: String,
    pub event_type: EventType,
    /// Channels the watch is scoped to.
    pub channel_ids: Vec<ChannelId>,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputBinding>,
}

impl Watch {
    /// Whether the watch's channel scope includes `channel`.
    pub fn covers_channel(&self, channel: &ChannelId) -> bool {
        self.channel_ids.iter().any(|c| c == channel)
    }
}

/// Everything needed to ask the platform for a new watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSpec {
    pub name: String,
    pub description: String,
    pub target_workflow: String,
    pub event_type: EventType,
    pub channel_ids: Vec<ChannelId>,
    /// Platform filter statement; only matching events fire the watch.
    pub filter: Option<String>,
    pub inputs: BTreeMap<String, InputBinding>,
}

/// Criteria passed to the platform when listing watches.
///
/// The platform only filters on ownership; everything else is filtered by
/// the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchQuery {
    pub owned_by_app: bool,
}

impl Default for WatchQuery {
    fn default() -> Self {
        Self { owned_by_app: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_wire_names() {
        assert_eq!(
            EventType::from("slack#/events/message_posted".to_string()),
            EventType::MessagePosted
        );
        assert_eq!(
            EventType::from("slack#/events/reaction_added".to_string()),
            EventType::Other("slack#/events/reaction_added".to_string())
        );
        let json = serde_json::to_string(&EventType::UserJoinedChannel).unwrap();
        assert_eq!(json, "\"slack#/events/user_joined_channel\"");
    }

    #[test]
    fn test_event_data_binding() {
        assert_eq!(InputBinding::event_data("user_id").value, "{{data.user_id}}");
        assert_eq!(InputBinding::fixed("C1").value, "C1");
    }

    #[test]
    fn test_covers_channel() {
        let watch = Watch {
            id: "Ft01".to_string(),
            name: "alert".to_string(),
            target_workflow: "send_alert_workflow".to_string(),
            event_type: EventType::MessagePosted,
            channel_ids: vec![ChannelId::new("C1"), ChannelId::new("C2")],
            inputs: BTreeMap::new(),
        };
        assert!(watch.covers_channel(&ChannelId::new("C2")));
        assert!(!watch.covers_channel(&ChannelId::new("C3")));
    }

    #[test]
    fn test_default_query_is_owned_by_app() {
        assert!(WatchQuery::default().owned_by_app);
    }
}
