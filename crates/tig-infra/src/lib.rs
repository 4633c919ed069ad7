//! Infrastructure layer for TIG Advisor.
//!
//! Contains implementations of the ports defined in `tig-core`: the SQLite
//! alert route store and the Slack Web API client (watches and direct
//! messages), plus configuration loading and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod slack;
pub mod sqlite;
