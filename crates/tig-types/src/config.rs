//! Configuration types for TIG Advisor.
//!
//! `AdvisorConfig` represents the top-level `config.toml` in the data
//! directory. Every field has a default, so an empty or missing file is a
//! valid configuration.

use serde::{Deserialize, Serialize};

use crate::manifest;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Word a message must contain for the alert watch to fire.
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Callback id of the workflow invoked by alert watches.
    #[serde(default = "default_dispatch_workflow")]
    pub dispatch_workflow: String,

    /// Display name given to newly created watches.
    #[serde(default = "default_watch_name")]
    pub watch_name: String,

    /// Alert text. `{channel}` and `{keyword}` are substituted.
    #[serde(default = "default_alert_template")]
    pub alert_template: String,

    /// Send the registering user a confirmation DM after setup.
    #[serde(default = "default_true")]
    pub setup_confirmation: bool,

    #[serde(default = "default_confirmation_message")]
    pub confirmation_message: String,

    #[serde(default)]
    pub slack: SlackConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_keyword() -> String {
    "TIG".to_string()
}

fn default_dispatch_workflow() -> String {
    manifest::SEND_ALERT_WORKFLOW.to_string()
}

fn default_watch_name() -> String {
    "TIG Announcement Was Sent".to_string()
}

fn default_alert_template() -> String {
    ":rotating_light: A message containing '{keyword}' was just posted in <#{channel}>. \
     Read it before taking any action that could result in a TIG."
        .to_string()
}

fn default_true() -> bool {
    true
}

fn default_confirmation_message() -> String {
    "TIG Advisor is all set and ready! :white_check_mark:".to_string()
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            dispatch_workflow: default_dispatch_workflow(),
            watch_name: default_watch_name(),
            alert_template: default_alert_template(),
            setup_confirmation: true,
            confirmation_message: default_confirmation_message(),
            slack: SlackConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Chat platform connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bot token. `SLACK_BOT_TOKEN` takes precedence when set.
    #[serde(default)]
    pub bot_token: Option<String>,
}

fn default_api_base_url() -> String {
    "https://slack.com/api".to_string()
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            bot_token: None,
        }
    }
}

/// HTTP listener settings for `tig-advisor serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
