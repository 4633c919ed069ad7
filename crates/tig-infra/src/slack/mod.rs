//! Slack Web API adapter.
//!
//! Implements the platform ports from `tig-core` over HTTPS with a bot token.

pub mod client;
pub mod types;

pub use client::SlackClient;
