//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use adbfleet_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Server connection ────────────────────────────────────────────
    #[error("Could not reach the adb server at {addr}")]
    #[diagnostic(
        code(adbfleet::server_unreachable),
        help(
            "Check that the adb server is running.\n\
             Start it with: adb start-server"
        )
    )]
    ServerUnreachable { addr: String, reason: String },

    #[error("adb server request timed out after {seconds}s")]
    #[diagnostic(
        code(adbfleet::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Wireless transition ──────────────────────────────────────────
    #[error("No wireless address found for {serial} after {attempts} attempts")]
    #[diagnostic(
        code(adbfleet::no_wireless_address),
        help(
            "Make sure the device is connected to a Wi-Fi network.\n\
             The radio was enabled automatically; joining a network may need\n\
             a saved access point or manual action on the device."
        )
    )]
    NoWirelessAddress { serial: String, attempts: u32 },

    #[error("Could not switch {serial} to network listen mode: {reason}")]
    #[diagnostic(code(adbfleet::mode_switch_failed))]
    ModeSwitchFailed { serial: String, reason: String },

    #[error("Connect to {address} failed: {output}")]
    #[diagnostic(
        code(adbfleet::connect_failed),
        help("Verify the device and host share a network and no firewall blocks the port.")
    )]
    ConnectFailed { address: String, output: String },

    #[error("Device {serial} is already attached over TCP/IP")]
    #[diagnostic(
        code(adbfleet::already_wireless),
        help("The wireless transition only applies to USB-attached devices.")
    )]
    AlreadyWireless { serial: String },

    // ── Tunnels ──────────────────────────────────────────────────────
    #[error("Tunnel rule change failed on {serial}: {reason}")]
    #[diagnostic(code(adbfleet::tunnel_rule))]
    TunnelRule { serial: String, reason: String },

    /// Raised when an `enable`/`disable` finished with per-device
    /// failures; the per-device detail was already printed.
    #[error("Tunnel reconciliation failed on {failed} of {total} devices")]
    #[diagnostic(
        code(adbfleet::partial_failure),
        help("Re-run the command once the failing devices are back; it is idempotent.")
    )]
    PartialFailure { failed: usize, total: usize },

    // ── Devices ──────────────────────────────────────────────────────
    #[error("Device '{serial}' not found")]
    #[diagnostic(
        code(adbfleet::not_found),
        help("Run: adbfleet devices to see the attached fleet")
    )]
    DeviceNotFound { serial: String },

    #[error("{reason}")]
    #[diagnostic(code(adbfleet::no_usb_device))]
    AmbiguousTarget { reason: String },

    // ── Protocol / lifecycle ─────────────────────────────────────────
    #[error("adb server protocol error: {message}")]
    #[diagnostic(code(adbfleet::protocol))]
    Protocol { message: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(adbfleet::cancelled))]
    Cancelled,

    // ── Configuration / validation ───────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(adbfleet::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(adbfleet::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ServerUnreachable { .. } | Self::ConnectFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::DeviceNotFound { .. } => exit_code::NOT_FOUND,
            Self::AlreadyWireless { .. } => exit_code::CONFLICT,
            Self::Validation { .. } | Self::AmbiguousTarget { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AddressUnavailable { serial, attempts } => {
                CliError::NoWirelessAddress { serial, attempts }
            }

            CoreError::ModeSwitchFailed { serial, reason } => {
                CliError::ModeSwitchFailed { serial, reason }
            }

            CoreError::ConnectFailed { address, output } => {
                CliError::ConnectFailed { address, output }
            }

            CoreError::AlreadyWireless { serial } => CliError::AlreadyWireless { serial },

            CoreError::RuleApplyFailed { serial, reason } => CliError::TunnelRule { serial, reason },

            CoreError::EnumerationFailed { reason } => CliError::ServerUnreachable {
                addr: "(configured server)".into(),
                reason,
            },

            CoreError::DeviceNotFound { serial } => CliError::DeviceNotFound { serial },

            CoreError::Cancelled => CliError::Cancelled,

            CoreError::Bridge(err) => err.into(),
        }
    }
}

impl From<adbfleet_bridge::Error> for CliError {
    fn from(err: adbfleet_bridge::Error) -> Self {
        match err {
            adbfleet_bridge::Error::ConnectTimeout { timeout_secs, .. } => CliError::Timeout {
                seconds: timeout_secs,
            },
            adbfleet_bridge::Error::Io(io) => CliError::ServerUnreachable {
                addr: "(configured server)".into(),
                reason: io.to_string(),
            },
            adbfleet_bridge::Error::Protocol { message } => CliError::Protocol { message },
            adbfleet_bridge::Error::Rejected { service, message } => CliError::Protocol {
                message: format!("{service}: {message}"),
            },
        }
    }
}
