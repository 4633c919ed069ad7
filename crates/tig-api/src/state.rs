//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both the CLI and
//! the HTTP API. Services are generic over store/platform traits, but
//! AppState pins them to the SQLite store and the Slack client.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use tig_core::service::dispatch::DispatchService;
use tig_core::service::registration::{RegistrationService, WatchPolicy};
use tig_core::service::setup::SetupWorkflow;
use tig_infra::config::{load_config, resolve_bot_token};
use tig_infra::filesystem::resolve_data_dir;
use tig_infra::slack::SlackClient;
use tig_infra::sqlite::alert_route::SqliteAlertRouteStore;
use tig_infra::sqlite::pool::{DatabasePool, database_url};
use tig_types::config::AdvisorConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSetupWorkflow = SetupWorkflow<SqliteAlertRouteStore, SlackClient, SlackClient>;

pub type ConcreteDispatchService = DispatchService<SlackClient>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub setup: Arc<ConcreteSetupWorkflow>,
    pub dispatch: Arc<ConcreteDispatchService>,
    pub routes: SqliteAlertRouteStore,
    pub config: Arc<AdvisorConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data dir, load config and token, then wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let token = resolve_bot_token(&config)?;

        Self::build(config, data_dir, token).await
    }

    /// Wire services from explicit parts.
    pub async fn build(
        config: AdvisorConfig,
        data_dir: PathBuf,
        token: SecretString,
    ) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;
        let routes = SqliteAlertRouteStore::new(db_pool);

        let slack = SlackClient::new(token, config.slack.api_base_url.clone())?;

        let registration = RegistrationService::new(
            routes.clone(),
            slack.clone(),
            WatchPolicy::from_config(&config),
        );
        let confirmation = config
            .setup_confirmation
            .then(|| config.confirmation_message.clone());
        let setup = SetupWorkflow::new(registration, slack.clone(), confirmation);

        let dispatch = DispatchService::from_config(slack, &config);

        tracing::debug!(data_dir = %data_dir.display(), "application state initialized");

        Ok(Self {
            setup: Arc::new(setup),
            dispatch: Arc::new(dispatch),
            routes,
            config: Arc::new(config),
            data_dir,
        })
    }
}
