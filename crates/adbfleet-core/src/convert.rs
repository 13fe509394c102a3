// ── Wire → domain conversion ──
//
// The bridge hands back raw line-format entries; these functions
// normalize them. Conversion never fails: unreadable fields degrade to
// `None`/`Unknown`, and reverse entries that are not plain TCP specs are
// dropped rather than guessed at.

use adbfleet_bridge::{DeviceEntry, ReverseEntry};

use crate::model::{Device, DeviceState, TunnelRule};

pub(crate) fn device_from_entry(entry: DeviceEntry) -> Device {
    let mut device = Device::new(entry.serial, DeviceState::from_wire(&entry.state));
    // `devices -l` underscores spaces in model names; undo that for display.
    device.model = entry.model.map(|m| m.replace('_', " "));
    device.name = entry.device;
    device
}

pub(crate) fn rule_from_entry(entry: &ReverseEntry) -> Option<TunnelRule> {
    Some(TunnelRule {
        remote_port: entry.remote_port()?,
        local_port: entry.local_port()?,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::TransportKind;

    fn entry(line: &str) -> DeviceEntry {
        let mut fields = line.split_whitespace();
        let serial = fields.next().unwrap().to_owned();
        let state = fields.next().unwrap().to_owned();
        let mut e = DeviceEntry {
            serial,
            state,
            product: None,
            model: None,
            device: None,
        };
        for field in fields {
            match field.split_once(':') {
                Some(("model", v)) => e.model = Some(v.to_owned()),
                Some(("device", v)) => e.device = Some(v.to_owned()),
                _ => {}
            }
        }
        e
    }

    #[test]
    fn online_usb_device_converts() {
        let device = device_from_entry(entry("SER123 device model:SM_G998B device:p3s"));
        assert_eq!(device.transport, TransportKind::Usb);
        assert!(device.state.is_online());
        assert_eq!(device.model.as_deref(), Some("SM G998B"));
        assert_eq!(device.name.as_deref(), Some("p3s"));
    }

    #[test]
    fn unauthorized_device_degrades_gracefully() {
        let device = device_from_entry(entry("SER456 unauthorized"));
        assert_eq!(device.state, DeviceState::Unauthorized);
        assert_eq!(device.model, None);
        assert_eq!(device.name, None);
    }

    #[test]
    fn non_tcp_reverse_entries_are_dropped() {
        let tcp = ReverseEntry {
            transport: "UsbFfs".into(),
            remote: "tcp:27183".into(),
            local: "tcp:27183".into(),
        };
        let socket = ReverseEntry {
            transport: "UsbFfs".into(),
            remote: "localabstract:scrcpy".into(),
            local: "tcp:27183".into(),
        };
        assert_eq!(
            rule_from_entry(&tcp),
            Some(TunnelRule {
                remote_port: 27183,
                local_port: 27183
            })
        );
        assert_eq!(rule_from_entry(&socket), None);
    }
}
