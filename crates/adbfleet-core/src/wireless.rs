// ── Wireless transition orchestrator ──
//
// Drives one USB-attached device onto a TCP/IP transport:
//
//   Start → DiscoveringAddress → (RadioEnabling → DiscoveringAddress)*
//         → ModeSwitching → Settling → Connecting → Done | Failed
//
// Radio enable fires at most once, on the first discovery miss. The
// retry loop and settle delay are cancellation yield points so a
// cooperative caller stays responsive; a cancelled operation fails with
// `Cancelled` instead of silently completing.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bridge::DeviceBridge;
use crate::error::CoreError;
use crate::model::Device;
use crate::suspend::{RefreshGate, RefreshPause};

/// Port the device's daemon listens on after the mode switch.
pub const WIRELESS_PORT: u16 = 5555;

/// Retry attempts after the initial discovery miss, at 1 Hz, no backoff.
const DISCOVERY_RETRIES: u32 = 10;
const DISCOVERY_INTERVAL: Duration = Duration::from_secs(1);

/// Grace period for the device's listener to come up after the mode
/// switch. The daemon restarts itself and an immediate connect races it.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

const INTERFACE_QUERY: &str = "ip addr show wlan0";
const RADIO_ENABLE: &str = "svc wifi enable";

/// Result of a successful transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionOutcome {
    /// Address discovered on the device's wireless interface.
    pub address: Ipv4Addr,
    /// Endpoint the new connection was established to.
    pub endpoint: String,
    /// Raw transport-layer result text, verbatim.
    pub connect_output: String,
}

/// Orchestrates the USB → wireless transition for a single device.
///
/// Stateless across invocations; every call re-derives what it needs
/// from the live device. The caller is responsible for not overlapping
/// two operations on the same device.
pub struct WirelessTransition {
    bridge: Arc<dyn DeviceBridge>,
    gate: Option<Arc<dyn RefreshGate>>,
    cancel: CancellationToken,
}

impl WirelessTransition {
    pub fn new(bridge: Arc<dyn DeviceBridge>) -> Self {
        Self {
            bridge,
            gate: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Suspend an external polling loop for the duration of each
    /// transition. Resumed on every exit path.
    pub fn with_refresh_gate(mut self, gate: Arc<dyn RefreshGate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Honor an external cancellation signal at every retry/delay yield
    /// point.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Transition `device` to a wireless transport.
    ///
    /// Side effects on success: the device's radio may have been
    /// enabled, its daemon listens on [`WIRELESS_PORT`], and a new
    /// connection entry exists in the device-management layer. There is
    /// no rollback on partial failure -- a device left listening after
    /// a failed connect is an idle listener, which is safe.
    pub async fn transition(&self, device: &Device) -> Result<TransitionOutcome, CoreError> {
        if device.is_wireless() {
            return Err(CoreError::AlreadyWireless {
                serial: device.serial.clone(),
            });
        }

        let _pause = self.gate.clone().map(RefreshPause::acquire);
        let serial = device.serial.as_str();

        let address = self.discover_with_retry(serial).await?;
        let Some(address) = address else {
            return Err(CoreError::AddressUnavailable {
                serial: serial.to_owned(),
                attempts: 1 + DISCOVERY_RETRIES,
            });
        };

        self.bridge
            .set_listen_mode(serial, WIRELESS_PORT)
            .await
            .map_err(|e| CoreError::ModeSwitchFailed {
                serial: serial.to_owned(),
                reason: e.to_string(),
            })?;

        // Settling: let the restarted daemon bring its listener up.
        self.pause(SETTLE_DELAY).await?;

        let endpoint = format!("{address}:{WIRELESS_PORT}");
        let connect_output = self
            .bridge
            .connect(&endpoint)
            .await
            .map_err(|e| CoreError::ConnectFailed {
                address: endpoint.clone(),
                output: e.to_string(),
            })?;

        info!(serial, %endpoint, "device transitioned to wireless");
        Ok(TransitionOutcome {
            address,
            endpoint,
            connect_output,
        })
    }

    /// One initial discovery attempt; on a miss, a single best-effort
    /// radio enable followed by the bounded 1 Hz retry loop.
    async fn discover_with_retry(&self, serial: &str) -> Result<Option<Ipv4Addr>, CoreError> {
        if let Some(address) = self.discover_address(serial).await {
            return Ok(Some(address));
        }

        debug!(serial, "no wireless address, enabling radio");
        if let Err(e) = self.bridge.run_shell(serial, RADIO_ENABLE).await {
            // Best-effort: the radio may already be on, or the command
            // may be unavailable; either way discovery continues.
            warn!(serial, error = %e, "radio enable failed, retrying discovery anyway");
        }

        for attempt in 1..=DISCOVERY_RETRIES {
            self.pause(DISCOVERY_INTERVAL).await?;
            if let Some(address) = self.discover_address(serial).await {
                debug!(serial, attempt, %address, "address discovered on retry");
                return Ok(Some(address));
            }
        }
        Ok(None)
    }

    /// Query the wireless interface and extract its first IPv4 address.
    /// Remote or parse failures count as a miss, never an error.
    async fn discover_address(&self, serial: &str) -> Option<Ipv4Addr> {
        match self.bridge.run_shell(serial, INTERFACE_QUERY).await {
            Ok(output) => parse_inet_address(&output),
            Err(e) => {
                debug!(serial, error = %e, "interface query failed, treating as miss");
                None
            }
        }
    }

    /// Cancellable delay; a cancelled wait aborts the operation.
    async fn pause(&self, duration: Duration) -> Result<(), CoreError> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            () = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

/// Extract the first `inet <dotted-quad>/<prefix>` address from
/// interface status text. `inet6` lines do not match.
fn parse_inet_address(text: &str) -> Option<Ipv4Addr> {
    for line in text.lines() {
        if let Some(rest) = line.trim_start().strip_prefix("inet ") {
            let address = rest
                .split_whitespace()
                .next()
                .and_then(|spec| spec.split('/').next())
                .and_then(|ip| ip.parse::<Ipv4Addr>().ok());
            if address.is_some() {
                return address;
            }
        }
    }
    None
}
