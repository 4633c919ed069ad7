//! In-memory fakes for the store and platform ports.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tig_types::error::{PlatformError, RepositoryError};
use tig_types::id::{ChannelId, UserId};
use tig_types::route::AlertRoute;
use tig_types::watch::{EventType, Watch, WatchQuery, WatchSpec};

use crate::platform::messenger::DirectMessenger;
use crate::platform::watch::WatchRegistry;
use crate::repository::alert_route::AlertRouteStore;

/// An alert watch as the platform would report it.
pub fn alert_watch(id: &str, channels: &[&str]) -> Watch {
    Watch {
        id: id.to_string(),
        name: "TIG Announcement Was Sent".to_string(),
        target_workflow: "send_alert_workflow".to_string(),
        event_type: EventType::MessagePosted,
        channel_ids: channels.iter().map(|c| ChannelId::new(*c)).collect(),
        inputs: BTreeMap::new(),
    }
}

#[derive(Clone, Default)]
pub struct FakeStore {
    routes: Arc<Mutex<Vec<AlertRoute>>>,
    fail: bool,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn routes(&self) -> Vec<AlertRoute> {
        self.routes.lock().unwrap().clone()
    }
}

impl AlertRouteStore for FakeStore {
    async fn put(&self, route: &AlertRoute) -> Result<(), RepositoryError> {
        if self.fail {
            return Err(RepositoryError::Connection);
        }
        self.routes.lock().unwrap().push(route.clone());
        Ok(())
    }
}

/// Watch registry whose `create_watch` adds to the listed watches, so
/// sequential registrations observe earlier creations.
#[derive(Clone, Default)]
pub struct FakeWatches {
    watches: Arc<Mutex<Vec<Watch>>>,
    created: Arc<Mutex<Vec<WatchSpec>>>,
    list_calls: Arc<AtomicUsize>,
    create_calls: Arc<AtomicUsize>,
    fail_list: bool,
    fail_create: bool,
}

impl FakeWatches {
    pub fn with_watches(watches: Vec<Watch>) -> Self {
        Self {
            watches: Arc::new(Mutex::new(watches)),
            ..Self::default()
        }
    }

    pub fn fail_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn fail_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn watches(&self) -> Vec<Watch> {
        self.watches.lock().unwrap().clone()
    }

    pub fn created_specs(&self) -> Vec<WatchSpec> {
        self.created.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

impl WatchRegistry for FakeWatches {
    async fn list_watches(&self, query: WatchQuery) -> Result<Vec<Watch>, PlatformError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        assert!(query.owned_by_app);
        if self.fail_list {
            return Err(PlatformError::Api("internal_error".to_string()));
        }
        Ok(self.watches())
    }

    async fn create_watch(&self, spec: &WatchSpec) -> Result<(), PlatformError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(PlatformError::Api("ratelimited".to_string()));
        }
        let mut watches = self.watches.lock().unwrap();
        let id = format!("Ft{}", watches.len() + 1);
        watches.push(Watch {
            id,
            name: spec.name.clone(),
            target_workflow: spec.target_workflow.clone(),
            event_type: spec.event_type.clone(),
            channel_ids: spec.channel_ids.clone(),
            inputs: spec.inputs.clone(),
        });
        self.created.lock().unwrap().push(spec.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeMessenger {
    sent: Arc<Mutex<Vec<(UserId, String)>>>,
    fail: bool,
}

impl FakeMessenger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl DirectMessenger for FakeMessenger {
    async fn send_direct_message(
        &self,
        recipient: &UserId,
        text: &str,
    ) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::Api("channel_not_found".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.clone(), text.to_string()));
        Ok(())
    }
}
