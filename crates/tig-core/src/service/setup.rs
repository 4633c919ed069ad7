//! Setup workflow: register the channel, then confirm to the user.
//!
//! The form step of the setup workflow is rendered by the platform; this
//! service runs what follows the submission.

use tig_types::error::{DispatchError, RegistrationError};
use tig_types::function::SetupInputs;

use crate::platform::messenger::DirectMessenger;
use crate::platform::watch::WatchRegistry;
use crate::repository::alert_route::AlertRouteStore;
use crate::service::registration::{RegistrationOutcome, RegistrationService};

/// Errors from the setup workflow.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// Registration succeeded but the confirmation DM could not be sent.
    #[error(transparent)]
    Confirmation(DispatchError),
}

pub struct SetupWorkflow<S: AlertRouteStore, W: WatchRegistry, M: DirectMessenger> {
    registration: RegistrationService<S, W>,
    messenger: M,
    /// Confirmation text, or `None` to skip the confirmation DM.
    confirmation: Option<String>,
}

impl<S: AlertRouteStore, W: WatchRegistry, M: DirectMessenger> SetupWorkflow<S, W, M> {
    pub fn new(
        registration: RegistrationService<S, W>,
        messenger: M,
        confirmation: Option<String>,
    ) -> Self {
        Self {
            registration,
            messenger,
            confirmation,
        }
    }

    pub fn registration(&self) -> &RegistrationService<S, W> {
        &self.registration
    }

    /// Register the channel and, when a user is known, confirm by DM.
    pub async fn run(&self, inputs: &SetupInputs) -> Result<RegistrationOutcome, SetupError> {
        let outcome = self
            .registration
            .register(&inputs.channel, inputs.user_to_alert.as_ref())
            .await?;

        if let (Some(text), Some(user)) = (&self.confirmation, &inputs.user_to_alert) {
            self.messenger
                .send_direct_message(user, text)
                .await
                .map_err(|source| {
                    SetupError::Confirmation(DispatchError::Send {
                        recipient: user.to_string(),
                        source,
                    })
                })?;
            tracing::debug!(recipient = %user, "setup confirmation sent");
        }

        Ok(outcome)
    }
}
