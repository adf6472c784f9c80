//! Sequential TCP capture server.
//!
//! Accepts one connection at a time on port 42424 and writes whatever the
//! peer sends, byte for byte, into `memory.bin`, `memory1.bin`, `memory2.bin`,
//! and so on. A connection ends when the peer closes it or stays idle for one
//! second; either way the file keeps what was received and the server goes
//! back to accepting.

pub mod client;
pub mod config;
pub mod drain;
pub mod error;
pub mod naming;
pub mod server;

pub use config::ServerConfig;
pub use drain::{DrainEnd, DrainOutcome};
pub use error::ServerError;
pub use server::{Capture, CaptureServer};
