//! Request relay subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request on /api/proxy/{*path}
//!     → server.rs (Axum setup, verb filter, request ID)
//!     → forward.rs (target URL, hop-by-hop hygiene, body decision)
//!     → hyper client (single attempt, no redirect following, no cache)
//!     → server.rs (strip content-encoding, stream body back)
//!     → Send to client
//!
//! on forwarding failure:
//!     → error.rs (502 envelope with the attempted target URL)
//! ```

pub mod error;
pub mod forward;
pub mod server;

pub use server::RelayServer;
