// ── Core error types ──
//
// User-facing errors from adbfleet-core. These are NOT wire-specific --
// consumers never see smart-socket status words directly. Failure kinds
// follow the orchestration semantics: discovery exhaustion and per-device
// rule failures are distinct from transport-level breakage.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Wireless transition ──────────────────────────────────────────
    #[error("No wireless address found for {serial} after {attempts} discovery attempts")]
    AddressUnavailable { serial: String, attempts: u32 },

    #[error("Could not switch {serial} to network listen mode: {reason}")]
    ModeSwitchFailed { serial: String, reason: String },

    /// Carries the transport layer's error text verbatim -- it is meant
    /// for a human operator, not for matching.
    #[error("Connect to {address} failed: {output}")]
    ConnectFailed { address: String, output: String },

    #[error("Device {serial} is already attached over TCP/IP")]
    AlreadyWireless { serial: String },

    // ── Fleet reconciliation ─────────────────────────────────────────
    /// Per-device failure inside a fleet apply; never escalated past the
    /// batch boundary.
    #[error("Tunnel rule change failed on {serial}: {reason}")]
    RuleApplyFailed { serial: String, reason: String },

    /// The host server itself could not be asked for the fleet.
    #[error("Device enumeration failed: {reason}")]
    EnumerationFailed { reason: String },

    // ── Operation lifecycle ──────────────────────────────────────────
    #[error("Device not found: {serial}")]
    DeviceNotFound { serial: String },

    #[error("Operation cancelled")]
    Cancelled,

    // ── Transport (wrapped) ──────────────────────────────────────────
    #[error(transparent)]
    Bridge(#[from] adbfleet_bridge::Error),
}

impl CoreError {
    /// True for per-device failures that a batch caller records and
    /// moves past rather than aborting on.
    pub fn is_device_local(&self) -> bool {
        matches!(self, Self::RuleApplyFailed { .. })
    }
}
