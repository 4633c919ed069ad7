use thiserror::Error;

/// Errors from repository operations (used by trait definitions in tig-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors returned by the chat platform's Web API.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The request never produced a usable HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The platform answered with `ok: false`.
    #[error("{0}")]
    Api(String),

    /// The platform answered with a body we could not decode.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Errors from registering a channel listener.
///
/// Each variant names the step that failed. Steps run in order, so the
/// variant also tells the caller which side effects already happened.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The alert route could not be saved; nothing else was attempted.
    #[error("Failed to save user to alert: {0}")]
    Persistence(#[source] RepositoryError),

    /// Existing watches could not be listed; no watch was created.
    #[error("Failed to lookup existing triggers: {0}")]
    Query(#[source] PlatformError),

    /// No watch existed and creating one failed; the route stays saved.
    #[error("Failed to create trigger: {0}")]
    Creation(#[source] PlatformError),
}

/// Errors from sending an alert direct message.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to send alert to {recipient}: {source}")]
    Send {
        recipient: String,
        #[source]
        source: PlatformError,
    },
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing bot token: set SLACK_BOT_TOKEN or slack.bot_token")]
    MissingToken,
}
