// ── Reverse tunnel domain types ──

use serde::{Deserialize, Serialize};

/// A reverse port-forward: connections initiated on the device's
/// `remote_port` land on the host's `local_port`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelRule {
    pub remote_port: u16,
    pub local_port: u16,
}

impl TunnelRule {
    /// A rule forwarding a device port to the same host port.
    pub const fn mirrored(port: u16) -> Self {
        Self {
            remote_port: port,
            local_port: port,
        }
    }
}

/// The fixed rule set the reconciler manages: three ports, each mapped
/// to itself. Applying them is idempotent on the device side.
pub const MANAGED_RULES: [TunnelRule; 3] = [
    TunnelRule::mirrored(27183),
    TunnelRule::mirrored(27184),
    TunnelRule::mirrored(27185),
];
