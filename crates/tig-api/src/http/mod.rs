//! HTTP API layer for TIG Advisor.
//!
//! Axum-based API: the two platform-invoked function endpoints, plus
//! read-only views under `/api/v1/` using the envelope response format.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
