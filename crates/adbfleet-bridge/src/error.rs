// ── Bridge error types ──
//
// Transport-level failures talking to the ADB host server. Consumers
// (adbfleet-core) translate these into domain-appropriate variants --
// nothing above this crate should need to inspect raw protocol bytes.

use thiserror::Error;

/// Unified error type for the bridge crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error talking to the ADB host server: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connecting to the ADB host server at {addr} timed out after {timeout_secs}s")]
    ConnectTimeout { addr: String, timeout_secs: u64 },

    /// The server answered, but not with anything the smart-socket
    /// protocol allows at that point.
    #[error("Protocol violation: {message}")]
    Protocol { message: String },

    /// The server (or the device's adbd, for transport-bound services)
    /// answered `FAIL` with the given reason.
    #[error("Service '{service}' rejected: {message}")]
    Rejected { service: String, message: String },
}

impl Error {
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}
