// ── Device bridge capability ──
//
// The full surface the orchestrators require from the device-management
// layer, as a trait so they can be driven against a mock fleet in tests.
// `AdbClient` is the production implementation.

use async_trait::async_trait;

use adbfleet_bridge::{AdbClient, Error as BridgeError};

use crate::convert;
use crate::model::{Device, TunnelRule};

/// Capability surface of the device-management transport layer.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Enumerate the currently attached fleet. Membership is volatile;
    /// callers must treat the result as a snapshot valid for one
    /// operation only.
    async fn list_devices(&self) -> Result<Vec<Device>, BridgeError>;

    /// Run a remote shell command and collect its output.
    async fn run_shell(&self, serial: &str, command: &str) -> Result<String, BridgeError>;

    /// Switch a device to listening for network connections on `port`.
    async fn set_listen_mode(&self, serial: &str, port: u16) -> Result<(), BridgeError>;

    /// Connect to a network device at `host:port`, returning the
    /// transport layer's result text verbatim.
    async fn connect(&self, address: &str) -> Result<String, BridgeError>;

    /// Drop a network device by identity.
    async fn disconnect(&self, serial: &str) -> Result<(), BridgeError>;

    /// Install a reverse rule; re-installing an existing rule rebinds it
    /// and must not error.
    async fn add_reverse_rule(&self, serial: &str, remote: u16, local: u16)
    -> Result<(), BridgeError>;

    /// Remove a reverse rule by its device-side port.
    async fn remove_reverse_rule(&self, serial: &str, remote: u16) -> Result<(), BridgeError>;

    /// List a device's active reverse rules.
    async fn list_reverse_rules(&self, serial: &str) -> Result<Vec<TunnelRule>, BridgeError>;
}

#[async_trait]
impl DeviceBridge for AdbClient {
    async fn list_devices(&self) -> Result<Vec<Device>, BridgeError> {
        let entries = AdbClient::list_devices(self).await?;
        Ok(entries.into_iter().map(convert::device_from_entry).collect())
    }

    async fn run_shell(&self, serial: &str, command: &str) -> Result<String, BridgeError> {
        self.shell(serial, command).await
    }

    async fn set_listen_mode(&self, serial: &str, port: u16) -> Result<(), BridgeError> {
        // adbd acknowledges with a restart banner; the banner itself is
        // of no use to callers.
        self.tcpip(serial, port).await.map(|_| ())
    }

    async fn connect(&self, address: &str) -> Result<String, BridgeError> {
        AdbClient::connect(self, address).await
    }

    async fn disconnect(&self, serial: &str) -> Result<(), BridgeError> {
        AdbClient::disconnect(self, serial).await.map(|_| ())
    }

    async fn add_reverse_rule(
        &self,
        serial: &str,
        remote: u16,
        local: u16,
    ) -> Result<(), BridgeError> {
        self.reverse_forward(serial, remote, local).await
    }

    async fn remove_reverse_rule(&self, serial: &str, remote: u16) -> Result<(), BridgeError> {
        self.reverse_remove(serial, remote).await
    }

    async fn list_reverse_rules(&self, serial: &str) -> Result<Vec<TunnelRule>, BridgeError> {
        let entries = self.reverse_list(serial).await?;
        Ok(entries.iter().filter_map(convert::rule_from_entry).collect())
    }
}
