//! Alert dispatch.
//!
//! Invoked when an alert watch fires. The platform has already resolved the
//! watch's bound inputs, so dispatch is a single direct message: no lookup,
//! no branching, no retry.

use tig_types::config::AdvisorConfig;
use tig_types::error::DispatchError;
use tig_types::id::{ChannelId, UserId};

use crate::platform::messenger::DirectMessenger;

/// Sends keyword alerts as direct messages.
pub struct DispatchService<M: DirectMessenger> {
    messenger: M,
    template: String,
    keyword: String,
}

impl<M: DirectMessenger> DispatchService<M> {
    pub fn new(messenger: M, template: String, keyword: String) -> Self {
        Self {
            messenger,
            template,
            keyword,
        }
    }

    pub fn from_config(messenger: M, config: &AdvisorConfig) -> Self {
        Self::new(
            messenger,
            config.alert_template.clone(),
            config.keyword.clone(),
        )
    }

    /// Alert `triggered_user` that a matching message appeared in `channel`.
    pub async fn dispatch(
        &self,
        channel: &ChannelId,
        triggered_user: &UserId,
    ) -> Result<(), DispatchError> {
        let text = render_alert(&self.template, channel, &self.keyword);
        self.messenger
            .send_direct_message(triggered_user, &text)
            .await
            .map_err(|source| DispatchError::Send {
                recipient: triggered_user.to_string(),
                source,
            })?;

        tracing::info!(channel = %channel, recipient = %triggered_user, "alert sent");
        Ok(())
    }
}

/// Substitute `{channel}` and `{keyword}` in an alert template.
pub fn render_alert(template: &str, channel: &ChannelId, keyword: &str) -> String {
    template
        .replace("{channel}", channel.as_str())
        .replace("{keyword}", keyword)
}
