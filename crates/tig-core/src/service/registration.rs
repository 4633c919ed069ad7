//! Channel listener registration.
//!
//! Registering a channel saves an alert route and makes sure exactly one
//! alert watch exists for that channel. Watches are the expensive,
//! externally visible resource, so duplicates are prevented at the watch
//! level only; alert routes simply accumulate.
//!
//! The steps run strictly in order (save route -> list watches -> create
//! watch if none matched) and the first failure aborts the rest. Nothing is
//! rolled back: a route saved before a failed watch creation stays saved.
//!
//! List-then-create is not atomic. Two concurrent registrations for the same
//! channel can both see "no watch" and both create one; the platform then
//! fires the alert workflow twice per matching message.

use std::collections::BTreeMap;

use tig_types::config::AdvisorConfig;
use tig_types::error::{PlatformError, RegistrationError};
use tig_types::id::{ChannelId, UserId};
use tig_types::route::{AlertRoute, AlertRouteId};
use tig_types::watch::{EventType, InputBinding, Watch, WatchQuery, WatchSpec};

use crate::platform::watch::WatchRegistry;
use crate::repository::alert_route::AlertRouteStore;

/// How alert watches are recognized and built.
#[derive(Debug, Clone)]
pub struct WatchPolicy {
    /// Callback id of the workflow alert watches invoke.
    pub dispatch_workflow: String,
    pub watch_name: String,
    pub watch_description: String,
    /// Keyword a message must contain to fire the watch. `None` fires on
    /// every message.
    pub keyword: Option<String>,
}

impl WatchPolicy {
    pub fn from_config(config: &AdvisorConfig) -> Self {
        let keyword = Some(config.keyword.trim().to_string()).filter(|k| !k.is_empty());
        let watch_description = match &keyword {
            Some(k) => format!("Triggered when a message containing '{k}' is sent in the channel"),
            None => "Triggered when a message is sent in the channel".to_string(),
        };
        Self {
            dispatch_workflow: config.dispatch_workflow.clone(),
            watch_name: config.watch_name.clone(),
            watch_description,
            keyword,
        }
    }

    /// Whether `watch` is an alert watch (right workflow, message-posted).
    pub fn is_alert_watch(&self, watch: &Watch) -> bool {
        watch.target_workflow == self.dispatch_workflow
            && watch.event_type == EventType::MessagePosted
    }

    /// Whether `watch` is an alert watch covering `channel`.
    pub fn matches(&self, watch: &Watch, channel: &ChannelId) -> bool {
        self.is_alert_watch(watch) && watch.covers_channel(channel)
    }

    /// Build the spec for a new alert watch scoped to exactly `channel`.
    ///
    /// `channel` is always bound as a literal. `triggered_user` is bound to
    /// the registering user when known, otherwise to the message author.
    pub fn spec_for(&self, channel: &ChannelId, user: Option<&UserId>) -> WatchSpec {
        let mut inputs = BTreeMap::new();
        inputs.insert("channel".to_string(), InputBinding::fixed(channel.as_str()));
        let triggered_user = match user {
            Some(u) => InputBinding::fixed(u.as_str()),
            None => InputBinding::event_data("user_id"),
        };
        inputs.insert("triggered_user".to_string(), triggered_user);

        WatchSpec {
            name: self.watch_name.clone(),
            description: self.watch_description.clone(),
            target_workflow: self.dispatch_workflow.clone(),
            event_type: EventType::MessagePosted,
            channel_ids: vec![channel.clone()],
            filter: self.keyword_filter(),
            inputs,
        }
    }

    fn keyword_filter(&self) -> Option<String> {
        self.keyword.as_ref().map(|k| {
            let escaped = k.replace('\\', "\\\\").replace('\'', "\\'");
            format!("{{{{data.text}}}} CONTAINS '{escaped}'")
        })
    }
}

/// What a successful registration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub route_id: AlertRouteId,
    /// `false` when a matching watch already existed.
    pub watch_created: bool,
}

/// Registers channels for keyword alerts.
pub struct RegistrationService<S: AlertRouteStore, W: WatchRegistry> {
    store: S,
    watches: W,
    policy: WatchPolicy,
}

impl<S: AlertRouteStore, W: WatchRegistry> RegistrationService<S, W> {
    pub fn new(store: S, watches: W, policy: WatchPolicy) -> Self {
        Self {
            store,
            watches,
            policy,
        }
    }

    pub fn policy(&self) -> &WatchPolicy {
        &self.policy
    }

    /// Save an alert route for `channel` and ensure an alert watch exists.
    pub async fn register(
        &self,
        channel: &ChannelId,
        requesting_user: Option<&UserId>,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        let route = AlertRoute::new(channel.clone(), requesting_user.cloned());

        self.store
            .put(&route)
            .await
            .map_err(RegistrationError::Persistence)?;
        tracing::debug!(route_id = %route.id, channel = %channel, "alert route saved");

        let exists = self
            .find_watch(channel)
            .await
            .map_err(RegistrationError::Query)?;

        if exists {
            tracing::info!(channel = %channel, "alert watch already exists, skipping creation");
            return Ok(RegistrationOutcome {
                route_id: route.id,
                watch_created: false,
            });
        }

        let spec = self.policy.spec_for(channel, requesting_user);
        self.watches
            .create_watch(&spec)
            .await
            .map_err(RegistrationError::Creation)?;
        tracing::info!(channel = %channel, workflow = %spec.target_workflow, "alert watch created");

        Ok(RegistrationOutcome {
            route_id: route.id,
            watch_created: true,
        })
    }

    /// All alert watches owned by the app, across channels.
    pub async fn alert_watches(&self) -> Result<Vec<Watch>, PlatformError> {
        let all = self.watches.list_watches(WatchQuery::default()).await?;
        Ok(all
            .into_iter()
            .filter(|w| self.policy.is_alert_watch(w))
            .collect())
    }

    /// Whether an alert watch for `channel` already exists.
    async fn find_watch(&self, channel: &ChannelId) -> Result<bool, PlatformError> {
        let all = self.watches.list_watches(WatchQuery::default()).await?;
        Ok(all.iter().any(|w| self.policy.matches(w, channel)))
    }
}
