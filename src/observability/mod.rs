//! Observability subsystem.
//!
//! Structured logging via `tracing`; request IDs are attached and
//! propagated by the relay's middleware layers.

pub mod logging;

pub use logging::init_tracing;
