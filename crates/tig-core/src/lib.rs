//! Business logic and port trait definitions for TIG Advisor.
//!
//! This crate defines the "ports" (store and platform traits) that the
//! infrastructure layer implements. It depends only on `tig-types` -- never
//! on `tig-infra` or any database/HTTP crate.

pub mod platform;
pub mod repository;
pub mod service;
