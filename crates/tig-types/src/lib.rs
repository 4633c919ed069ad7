//! Shared domain types for TIG Advisor.
//!
//! This crate contains the core domain types used across the workspace:
//! channel and user identifiers, alert routes, platform watches, the app
//! manifest, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod function;
pub mod id;
pub mod manifest;
pub mod route;
pub mod watch;
