//! Observability setup for TIG Advisor: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
