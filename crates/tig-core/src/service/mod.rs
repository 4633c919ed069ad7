//! Business logic services (use cases).
//!
//! Services orchestrate store and platform calls. They depend on traits
//! (ports) -- never on concrete infrastructure implementations.

pub mod dispatch;
pub mod registration;
pub mod setup;

#[cfg(test)]
pub(crate) mod testing;
