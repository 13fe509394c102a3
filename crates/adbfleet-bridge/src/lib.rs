//! Async client for the ADB host server's smart-socket protocol.
//!
//! Raw transport only: requests are framed service strings, replies are
//! status words and length-delimited payloads, and everything comes back
//! as wire-shaped entries. Domain types live in `adbfleet-core`.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod wire;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::AdbClient;
pub use error::Error;
pub use models::{DeviceEntry, ReverseEntry};
pub use transport::{BridgeConfig, DEFAULT_SERVER_ADDR};
