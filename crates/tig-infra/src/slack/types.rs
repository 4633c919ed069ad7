//! Slack Web API wire types.
//!
//! Only the fields the advisor reads or writes are modeled. Every Slack
//! response carries `ok` and, on failure, an `error` code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tig_types::id::ChannelId;
use tig_types::watch::{EventType, InputBinding, Watch, WatchSpec};

/// Envelope shared by all Web API responses.
#[derive(Debug, Deserialize)]
pub struct SlackResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub body: Option<T>,
}

// ---------------------------------------------------------------------------
// workflows.triggers.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TriggerListBody {
    #[serde(default)]
    pub triggers: Vec<SlackTrigger>,
    #[serde(default)]
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl TriggerListBody {
    /// Cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .and_then(|m| m.next_cursor.as_deref())
            .filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct SlackTrigger {
    pub id: String,
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default)]
    pub name: String,
    pub workflow: TriggerWorkflow,
    /// Present on event triggers only.
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub channel_ids: Vec<String>,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputBinding>,
}

#[derive(Debug, Deserialize)]
pub struct TriggerWorkflow {
    pub callback_id: String,
}

impl From<SlackTrigger> for Watch {
    fn from(t: SlackTrigger) -> Self {
        let event_type = match t.event_type {
            Some(raw) => EventType::from(raw),
            // Shortcut, webhook and scheduled triggers have no event type.
            None => EventType::Other(t.trigger_type),
        };
        Watch {
            id: t.id,
            name: t.name,
            target_workflow: t.workflow.callback_id,
            event_type,
            channel_ids: t.channel_ids.into_iter().map(ChannelId::new).collect(),
            inputs: t.inputs,
        }
    }
}

// ---------------------------------------------------------------------------
// workflows.triggers.create
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct CreateTriggerRequest<'a> {
    #[serde(rename = "type")]
    pub trigger_type: &'static str,
    pub name: &'a str,
    pub description: &'a str,
    /// App-relative workflow reference, `#/workflows/<callback_id>`.
    pub workflow: String,
    pub event: TriggerEvent<'a>,
    pub inputs: &'a BTreeMap<String, InputBinding>,
}

#[derive(Debug, Serialize)]
pub struct TriggerEvent<'a> {
    pub event_type: &'a str,
    pub channel_ids: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<TriggerFilter<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TriggerFilter<'a> {
    pub version: u8,
    pub root: FilterRoot<'a>,
}

#[derive(Debug, Serialize)]
pub struct FilterRoot<'a> {
    pub statement: &'a str,
}

impl<'a> From<&'a WatchSpec> for CreateTriggerRequest<'a> {
    fn from(spec: &'a WatchSpec) -> Self {
        CreateTriggerRequest {
            trigger_type: "event",
            name: &spec.name,
            description: &spec.description,
            workflow: format!("#/workflows/{}", spec.target_workflow),
            event: TriggerEvent {
                event_type: spec.event_type.as_str(),
                channel_ids: spec.channel_ids.iter().map(|c| c.as_str()).collect(),
                filter: spec.filter.as_deref().map(|statement| TriggerFilter {
                    version: 1,
                    root: FilterRoot { statement },
                }),
            },
            inputs: &spec.inputs,
        }
    }
}

// ---------------------------------------------------------------------------
// chat.postMessage
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PostMessageRequest<'a> {
    /// A user id here delivers the message as a DM from the app.
    pub channel: &'a str,
    pub text: &'a str,
}

/// Body of responses whose payload the advisor ignores.
#[derive(Debug, Deserialize)]
pub struct Ignored {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_list_maps_to_watches() {
        let json = serde_json::json!({
            "ok": true,
            "triggers": [
                {
                    "id": "Ft01",
                    "type": "event",
                    "name": "TIG Announcement Was Sent",
                    "workflow": {"callback_id": "send_alert_workflow", "title": "Send Alert"},
                    "event_type": "slack#/events/message_posted",
                    "channel_ids": ["C1"],
                    "inputs": {"channel": {"value": "C1"}}
                },
                {
                    "id": "Ft02",
                    "type": "shortcut",
                    "name": "Setup",
                    "workflow": {"callback_id": "setup_channel_listener_workflow"}
                }
            ],
            "response_metadata": {"next_cursor": ""}
        });

        let resp: SlackResponse<TriggerListBody> = serde_json::from_value(json).unwrap();
        assert!(resp.ok);
        let body = resp.body.unwrap();
        assert!(body.next_cursor().is_none());

        let watches: Vec<Watch> = body.triggers.into_iter().map(Watch::from).collect();
        assert_eq!(watches[0].event_type, EventType::MessagePosted);
        assert_eq!(watches[0].channel_ids, vec![ChannelId::new("C1")]);
        assert_eq!(watches[0].inputs["channel"], InputBinding::fixed("C1"));
        assert_eq!(watches[1].event_type, EventType::Other("shortcut".to_string()));
        assert!(watches[1].channel_ids.is_empty());
    }

    #[test]
    fn test_error_response() {
        let json = serde_json::json!({"ok": false, "error": "invalid_auth"});
        let resp: SlackResponse<Ignored> = serde_json::from_value(json).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("invalid_auth"));
    }

    #[test]
    fn test_create_request_shape() {
        let mut inputs = BTreeMap::new();
        inputs.insert("channel".to_string(), InputBinding::fixed("C1"));
        let spec = WatchSpec {
            name: "TIG Announcement Was Sent".to_string(),
            description: "desc".to_string(),
            target_workflow: "send_alert_workflow".to_string(),
            event_type: EventType::MessagePosted,
            channel_ids: vec![ChannelId::new("C1")],
            filter: Some("{{data.text}} CONTAINS 'TIG'".to_string()),
            inputs,
        };

        let json = serde_json::to_value(CreateTriggerRequest::from(&spec)).unwrap();
        assert_eq!(json["type"], "event");
        assert_eq!(json["workflow"], "#/workflows/send_alert_workflow");
        assert_eq!(json["event"]["event_type"], "slack#/events/message_posted");
        assert_eq!(json["event"]["channel_ids"], serde_json::json!(["C1"]));
        assert_eq!(json["event"]["filter"]["version"], 1);
        assert_eq!(
            json["event"]["filter"]["root"]["statement"],
            "{{data.text}} CONTAINS 'TIG'"
        );
        assert_eq!(json["inputs"]["channel"]["value"], "C1");
    }

    #[test]
    fn test_create_request_without_filter() {
        let spec = WatchSpec {
            name: "n".to_string(),
            description: "d".to_string(),
            target_workflow: "send_alert_workflow".to_string(),
            event_type: EventType::MessagePosted,
            channel_ids: vec![ChannelId::new("C1")],
            filter: None,
            inputs: BTreeMap::new(),
        };
        let json = serde_json::to_value(CreateTriggerRequest::from(&spec)).unwrap();
        assert!(json["event"].get("filter").is_none());
    }
}
