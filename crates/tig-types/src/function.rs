//! Inputs and results of the platform-invoked functions.
//!
//! The platform calls two functions: the channel listener setup (after the
//! setup form is submitted) and the alert dispatch (when a watch fires).
//! Both answer in the platform's function-result shape.

use serde::{Deserialize, Serialize};

use crate::id::{ChannelId, UserId};

/// Inputs of the setup function. Only `channel` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupInputs {
    pub channel: ChannelId,
    #[serde(default)]
    pub user_to_alert: Option<UserId>,
}

/// Inputs of the alert dispatch function, resolved from the watch's bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertInputs {
    pub channel: ChannelId,
    pub triggered_user: UserId,
}

/// Result reported back to the workflow engine.
///
/// Serializes as `{"outputs": {...}}` on success or `{"error": "..."}` on
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FunctionResult {
    Error { error: String },
    Outputs { outputs: serde_json::Map<String, serde_json::Value> },
}

impl FunctionResult {
    /// A success with no outputs.
    pub fn empty() -> Self {
        FunctionResult::Outputs {
            outputs: serde_json::Map::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        FunctionResult::Error {
            error: message.into(),
        }
    }
}
