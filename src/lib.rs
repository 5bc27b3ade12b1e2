//! Backend request relay and endpoint resolution.
//!
//! The real API for this application lives on a separate backend origin.
//! This crate provides the edge pieces that sit between the UI layer and
//! that backend: a relay that forwards `/api/proxy/*` requests upstream,
//! the resolver that decides which concrete URL a logical path maps to,
//! and a small typed client built on top of the resolver.

pub mod client;
pub mod config;
pub mod observability;
pub mod relay;
pub mod resolve;

pub use config::RelayConfig;
pub use relay::RelayServer;
