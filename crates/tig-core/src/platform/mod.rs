//! Chat platform ports.
//!
//! The platform owns watches and message delivery. These traits are the
//! narrow request/response surface the services depend on; `tig-infra`
//! implements them over the Slack Web API.

pub mod messenger;
pub mod watch;
