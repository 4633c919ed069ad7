//! The app manifest registered with the chat platform.
//!
//! Declares the app's workflows, its datastore, and the bot scopes it needs.
//! The workflow callback ids double as the identifiers watches are matched on.

use serde::Serialize;

/// Callback id of the setup workflow (form -> register -> confirm).
pub const SETUP_WORKFLOW: &str = "setup_channel_listener_workflow";

/// Callback id of the workflow alert watches invoke.
pub const SEND_ALERT_WORKFLOW: &str = "send_alert_workflow";

/// Name of the datastore holding alert routes.
pub const ALERT_ROUTES_DATASTORE: &str = "users_to_alert";

/// Scopes the bot token must carry.
pub const BOT_SCOPES: &[&str] = &[
    "chat:write",
    "chat:write.public",
    "channels:read",
    "datastore:read",
    "datastore:write",
    "triggers:write",
    "triggers:read",
];

/// A workflow as declared in the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowManifest {
    pub callback_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_parameters: &'static [&'static str],
    pub required: &'static [&'static str],
}

/// The complete app manifest.
#[derive(Debug, Clone, Serialize)]
pub struct AppManifest {
    pub name: &'static str,
    pub description: &'static str,
    pub workflows: Vec<WorkflowManifest>,
    pub datastores: Vec<&'static str>,
    pub bot_scopes: Vec<&'static str>,
}

/// Build the manifest for this app.
pub fn app_manifest() -> AppManifest {
    AppManifest {
        name: "TIG Advisor",
        description: "Alerts you every time an announcement warning against actions that \
                      could result in a TIG is posted in a channel.",
        workflows: vec![
            WorkflowManifest {
                callback_id: SETUP_WORKFLOW,
                title: "Setup Channel Listener",
                description: "Defines the channel to listen for TIG announcements.",
                input_parameters: &["interactivity", "channel"],
                required: &["interactivity"],
            },
            WorkflowManifest {
                callback_id: SEND_ALERT_WORKFLOW,
                title: "Send Alert",
                description: "Sends a DM to the user who set up the alert \
                              when a TIG message is sent.",
                input_parameters: &["channel", "triggered_user"],
                required: &["channel", "triggered_user"],
            },
        ],
        datastores: vec![ALERT_ROUTES_DATASTORE],
        bot_scopes: BOT_SCOPES.to_vec(),
    }
}
