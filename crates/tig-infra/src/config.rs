//! Configuration loader for TIG Advisor.
//!
//! Reads `config.toml` from the data directory (`~/.tig-advisor/` by default)
//! and deserializes it into [`AdvisorConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::Path;

use secrecy::SecretString;
use tig_types::config::AdvisorConfig;
use tig_types::error::ConfigError;

/// Environment variable holding the bot token.
pub const BOT_TOKEN_ENV: &str = "SLACK_BOT_TOKEN";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`AdvisorConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AdvisorConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AdvisorConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AdvisorConfig::default();
        }
    };

    match toml::from_str::<AdvisorConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AdvisorConfig::default()
        }
    }
}

/// Resolve the bot token from the environment, falling back to the config.
pub fn resolve_bot_token(config: &AdvisorConfig) -> Result<SecretString, ConfigError> {
    pick_bot_token(std::env::var(BOT_TOKEN_ENV).ok(), config)
}

/// The environment value wins when non-empty.
fn pick_bot_token(
    env_value: Option<String>,
    config: &AdvisorConfig,
) -> Result<SecretString, ConfigError> {
    env_value
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            config
                .slack
                .bot_token
                .clone()
                .filter(|t| !t.trim().is_empty())
        })
        .map(|t| SecretString::from(t.trim().to_string()))
        .ok_or(ConfigError::MissingToken)
}
