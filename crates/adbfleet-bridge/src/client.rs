// ── ADB host server client ──
//
// Each method opens a fresh connection, issues one service request, and
// reads the reply. Host services (`host:*`) answer directly; device
// services are reached by first binding the connection to a device with
// `host:transport:<serial>` and then issuing the device-side service.

use tokio::net::TcpStream;
use tracing::debug;

use crate::error::Error;
use crate::models::{DeviceEntry, ReverseEntry};
use crate::transport::BridgeConfig;
use crate::wire;

/// Async client for the ADB host server.
#[derive(Debug, Clone, Default)]
pub struct AdbClient {
    config: BridgeConfig,
}

impl AdbClient {
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // ── Host services ────────────────────────────────────────────

    /// Host server protocol version (`host:version`).
    pub async fn host_version(&self) -> Result<u32, Error> {
        let mut stream = self.host_service("host:version").await?;
        let block = wire::read_block(&mut stream).await?;
        u32::from_str_radix(&block, 16)
            .map_err(|_| Error::protocol(format!("invalid version payload '{block}'")))
    }

    /// List attached devices with their long-format profile
    /// (`host:devices-l`).
    pub async fn list_devices(&self) -> Result<Vec<DeviceEntry>, Error> {
        debug!("listing devices");
        let mut stream = self.host_service("host:devices-l").await?;
        let payload = wire::read_block(&mut stream).await?;
        Ok(payload.lines().filter_map(DeviceEntry::parse).collect())
    }

    /// Connect the host server to a network device (`host:connect:<addr>`).
    ///
    /// The server reports failure *inside* an `OKAY` reply ("failed to
    /// connect to ..."), so the result text is returned verbatim and the
    /// caller decides what to make of it.
    pub async fn connect(&self, address: &str) -> Result<String, Error> {
        debug!(address, "requesting network connect");
        let service = format!("host:connect:{address}");
        let mut stream = self.host_service(&service).await?;
        wire::read_block(&mut stream).await
    }

    /// Drop a network device from the host server
    /// (`host:disconnect:<serial>`).
    pub async fn disconnect(&self, serial: &str) -> Result<String, Error> {
        debug!(serial, "requesting disconnect");
        let service = format!("host:disconnect:{serial}");
        let mut stream = self.host_service(&service).await?;
        wire::read_block(&mut stream).await
    }

    // ── Device services ──────────────────────────────────────────

    /// Run a shell command on a device and collect its output to EOF.
    pub async fn shell(&self, serial: &str, command: &str) -> Result<String, Error> {
        debug!(serial, command, "running shell command");
        let service = format!("shell:{command}");
        let mut stream = self.device_service(serial, &service).await?;
        wire::read_to_eof(&mut stream).await
    }

    /// Switch a device's adbd to TCP listen mode (`tcpip:<port>`).
    ///
    /// adbd restarts itself after acknowledging; the returned text is its
    /// restart banner.
    pub async fn tcpip(&self, serial: &str, port: u16) -> Result<String, Error> {
        debug!(serial, port, "switching device to TCP listen mode");
        let service = format!("tcpip:{port}");
        let mut stream = self.device_service(serial, &service).await?;
        wire::read_to_eof(&mut stream).await
    }

    /// Install a reverse forward on a device
    /// (`reverse:forward:tcp:<remote>;tcp:<local>`).
    ///
    /// Re-installing an existing spec rebinds it; the server does not
    /// treat that as an error.
    pub async fn reverse_forward(&self, serial: &str, remote: u16, local: u16) -> Result<(), Error> {
        debug!(serial, remote, local, "adding reverse forward");
        let service = format!("reverse:forward:tcp:{remote};tcp:{local}");
        self.device_service(serial, &service).await?;
        Ok(())
    }

    /// Remove a reverse forward (`reverse:killforward:tcp:<remote>`).
    pub async fn reverse_remove(&self, serial: &str, remote: u16) -> Result<(), Error> {
        debug!(serial, remote, "removing reverse forward");
        let service = format!("reverse:killforward:tcp:{remote}");
        self.device_service(serial, &service).await?;
        Ok(())
    }

    /// List a device's active reverse forwards (`reverse:list-forward`).
    pub async fn reverse_list(&self, serial: &str) -> Result<Vec<ReverseEntry>, Error> {
        debug!(serial, "listing reverse forwards");
        let mut stream = self.device_service(serial, "reverse:list-forward").await?;
        let payload = wire::read_block(&mut stream).await?;
        Ok(payload.lines().filter_map(ReverseEntry::parse).collect())
    }

    // ── Plumbing ─────────────────────────────────────────────────

    /// Open a connection and issue a host-side service, leaving the
    /// stream positioned at the reply payload.
    async fn host_service(&self, service: &str) -> Result<TcpStream, Error> {
        let mut stream = self.config.open().await?;
        wire::write_service(&mut stream, service).await?;
        wire::read_okay(&mut stream, service).await?;
        Ok(stream)
    }

    /// Bind a fresh connection to a device, then issue a device-side
    /// service on it.
    async fn device_service(&self, serial: &str, service: &str) -> Result<TcpStream, Error> {
        let transport = format!("host:transport:{serial}");
        let mut stream = self.config.open().await?;
        wire::write_service(&mut stream, &transport).await?;
        wire::read_okay(&mut stream, &transport).await?;
        wire::write_service(&mut stream, service).await?;
        wire::read_okay(&mut stream, service).await?;
        Ok(stream)
    }
}
