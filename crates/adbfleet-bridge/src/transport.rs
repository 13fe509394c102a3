// Connection settings for reaching the ADB host server.
//
// One `BridgeConfig` is shared by every request; each service call opens
// a fresh TCP connection, which is how the smart-socket protocol expects
// to be used for one-shot services.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpStream;

use crate::error::Error;

/// Default ADB host server endpoint (`adb start-server` binds here).
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:5037";

/// Connection configuration for the ADB host server.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Host server address.
    pub addr: SocketAddr,
    /// Per-connection establishment timeout.
    pub timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5037)),
            timeout: Duration::from_secs(10),
        }
    }
}

impl BridgeConfig {
    /// Open a fresh connection to the host server, bounded by `timeout`.
    pub(crate) async fn open(&self) -> Result<TcpStream, Error> {
        match tokio::time::timeout(self.timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => Err(Error::ConnectTimeout {
                addr: self.addr.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }),
        }
    }
}
