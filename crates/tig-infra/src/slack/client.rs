//! SlackClient -- concrete [`WatchRegistry`] and [`DirectMessenger`] over
//! the Slack Web API.
//!
//! Watches map to workflow event triggers (`workflows.triggers.*`) and
//! direct messages go through `chat.postMessage` addressed to a user id.
//!
//! The bot token is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use std::collections::HashSet;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use tig_core::platform::messenger::DirectMessenger;
use tig_core::platform::watch::WatchRegistry;
use tig_types::error::PlatformError;
use tig_types::id::UserId;
use tig_types::watch::{Watch, WatchQuery, WatchSpec};

use super::types::{
    CreateTriggerRequest, Ignored, PostMessageRequest, SlackResponse, TriggerListBody,
};

/// Slack Web API client. Cheap to clone (the HTTP pool is shared).
#[derive(Clone)]
pub struct SlackClient {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
}

impl SlackClient {
    /// Page size requested from `workflows.triggers.list`.
    const PAGE_SIZE: u32 = 200;

    /// Upper bound on pages fetched by one `list_watches` call.
    const MAX_PAGES: usize = 100;

    /// Create a client against `base_url` (no trailing slash needed).
    pub fn new(token: SecretString, base_url: impl Into<String>) -> Result<Self, PlatformError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PlatformError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Decode a Web API response, turning `ok: false` into [`PlatformError::Api`].
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, PlatformError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        let parsed: SlackResponse<T> = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(PlatformError::Api(format!("HTTP {status}")));
            }
            Err(e) => return Err(PlatformError::Decode(e.to_string())),
        };

        if !parsed.ok {
            return Err(PlatformError::Api(
                parsed.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }

        parsed
            .body
            .ok_or_else(|| PlatformError::Decode("missing response body".to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .post(self.url(method))
            .bearer_auth(self.token.expose_secret())
            .json(body)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        Self::decode(response).await
    }

    async fn list_page(
        &self,
        query: WatchQuery,
        cursor: Option<&str>,
    ) -> Result<TriggerListBody, PlatformError> {
        let mut params: Vec<(&str, String)> = vec![
            ("is_owner", query.owned_by_app.to_string()),
            ("limit", Self::PAGE_SIZE.to_string()),
        ];
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }

        let response = self
            .client
            .get(self.url("workflows.triggers.list"))
            .bearer_auth(self.token.expose_secret())
            .query(&params)
            .send()
            .await
            .map_err(|e| PlatformError::Transport(e.to_string()))?;

        Self::decode(response).await
    }
}

impl WatchRegistry for SlackClient {
    async fn list_watches(&self, query: WatchQuery) -> Result<Vec<Watch>, PlatformError> {
        let mut watches = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut cursor: Option<String> = None;

        for _ in 0..Self::MAX_PAGES {
            let page = self.list_page(query, cursor.as_deref()).await?;
            let next = page.next_cursor().map(str::to_string);
            watches.extend(page.triggers.into_iter().map(Watch::from));

            let Some(next) = next else {
                tracing::debug!(count = watches.len(), "listed triggers");
                return Ok(watches);
            };
            if !seen.insert(next.clone()) {
                return Err(PlatformError::Decode(format!(
                    "pagination cursor did not advance: '{next}'"
                )));
            }
            cursor = Some(next);
        }

        Err(PlatformError::Decode(format!(
            "trigger list exceeded {} pages",
            Self::MAX_PAGES
        )))
    }

    async fn create_watch(&self, spec: &WatchSpec) -> Result<(), PlatformError> {
        let request = CreateTriggerRequest::from(spec);
        let _: Ignored = self
            .post_json("workflows.triggers.create", &request)
            .await?;
        Ok(())
    }
}

impl DirectMessenger for SlackClient {
    async fn send_direct_message(
        &self,
        recipient: &UserId,
        text: &str,
    ) -> Result<(), PlatformError> {
        let request = PostMessageRequest {
            channel: recipient.as_str(),
            text,
        };
        let _: Ignored = self.post_json("chat.postMessage", &request).await?;
        Ok(())
    }
}
