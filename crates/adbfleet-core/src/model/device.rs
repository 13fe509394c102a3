// ── Device domain types ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// How the device is attached to the host server.
///
/// Derived purely from the shape of the identity string: network-attached
/// devices are named by their `host:port` endpoint, USB devices by a bare
/// serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TransportKind {
    Usb,
    Tcp,
}

impl TransportKind {
    /// Classify an identity string by its shape.
    pub fn from_serial(serial: &str) -> Self {
        if serial.contains(':') {
            Self::Tcp
        } else {
            Self::Usb
        }
    }
}

/// Device reachability as reported by the host server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum DeviceState {
    Online,
    Offline,
    Unauthorized,
    Unknown,
}

impl DeviceState {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// Map the host server's state word onto a domain state.
    pub fn from_wire(state: &str) -> Self {
        match state {
            "device" => Self::Online,
            "offline" => Self::Offline,
            "unauthorized" => Self::Unauthorized,
            _ => Self::Unknown,
        }
    }
}

/// A device as seen in one fleet enumeration.
///
/// Materialized fresh on every listing and never mutated in place; no
/// component holds one beyond the scope of a single operation. Display
/// fields are best-effort -- unauthorized or transitioning devices often
/// report nothing, and callers render a placeholder instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Identity: a bare serial (USB) or `host:port` endpoint (TCP/IP).
    pub serial: String,
    pub transport: TransportKind,
    pub state: DeviceState,
    pub model: Option<String>,
    pub name: Option<String>,
}

impl Device {
    pub fn new(serial: impl Into<String>, state: DeviceState) -> Self {
        let serial = serial.into();
        let transport = TransportKind::from_serial(&serial);
        Self {
            serial,
            transport,
            state,
            model: None,
            name: None,
        }
    }

    pub fn is_wireless(&self) -> bool {
        self.transport == TransportKind::Tcp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_shape_determines_transport() {
        assert_eq!(TransportKind::from_serial("R5CT30XYZAB"), TransportKind::Usb);
        assert_eq!(
            TransportKind::from_serial("192.168.1.50:5555"),
            TransportKind::Tcp
        );
    }

    #[test]
    fn wire_states_map_to_domain() {
        assert!(DeviceState::from_wire("device").is_online());
        assert_eq!(DeviceState::from_wire("offline"), DeviceState::Offline);
        assert_eq!(
            DeviceState::from_wire("unauthorized"),
            DeviceState::Unauthorized
        );
        assert_eq!(DeviceState::from_wire("recovery"), DeviceState::Unknown);
    }

    #[test]
    fn wireless_device_is_detected() {
        let device = Device::new("10.0.0.2:5555", DeviceState::Online);
        assert!(device.is_wireless());
        assert!(!Device::new("SERIAL123", DeviceState::Online).is_wireless());
    }
}
