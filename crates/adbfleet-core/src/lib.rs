//! Orchestration layer between `adbfleet-bridge` and UI consumers.
//!
//! This crate owns the domain model and the multi-step device workflows
//! for the adbfleet workspace:
//!
//! - **[`WirelessTransition`]** — Moves one USB-attached device onto a
//!   TCP/IP transport: discovers the device's wireless address (enabling
//!   the radio once and retrying at 1 Hz if needed), switches the device
//!   daemon into network listen mode, waits for it to settle, and
//!   connects.
//!
//! - **[`TunnelReconciler`]** — Applies or removes the managed
//!   reverse-tunnel rule set ([`MANAGED_RULES`]) across every attached
//!   device concurrently, isolating per-device failures so one bad
//!   device never blocks the fleet.
//!
//! - **[`DeviceBridge`]** — Capability trait over the device-management
//!   transport; implemented by [`adbfleet_bridge::AdbClient`] in
//!   production and by scripted fakes in tests.
//!
//! - **[`RefreshGate`]** — Hook for callers with a polling loop: the
//!   orchestrators suspend polling for the duration of an operation and
//!   resume it on every exit path.

pub mod bridge;
mod convert;
pub mod error;
pub mod model;
pub mod suspend;
pub mod tunnel;
pub mod wireless;

#[cfg(test)]
mod testing;

// ── Primary re-exports ──────────────────────────────────────────────
pub use bridge::DeviceBridge;
pub use error::CoreError;
pub use model::{Device, DeviceState, MANAGED_RULES, TransportKind, TunnelRule};
pub use suspend::{RefreshGate, RefreshPause};
pub use tunnel::{ApplyOutcome, DeviceApplyResult, DeviceApplyRow, TunnelReconciler};
pub use wireless::{TransitionOutcome, WIRELESS_PORT, WirelessTransition};
