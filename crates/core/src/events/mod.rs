//! Domain events module.
//!
//! Provides domain event types and the sink trait for emitting events after
//! successful goal lifecycle mutations. The notification store implements the
//! sink to turn events into notification rows; tests use the mock sink.

mod domain_event;
mod sink;

pub use domain_event::*;
pub use sink::*;
