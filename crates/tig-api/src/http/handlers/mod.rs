//! HTTP request handlers.

pub mod function;
pub mod watch;
