//! Wireless transition command.

use std::sync::Arc;

use adbfleet_bridge::AdbClient;
use adbfleet_core::{Device, DeviceBridge, TransitionOutcome, WirelessTransition};

use crate::cli::{GlobalOpts, WirelessArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &AdbClient,
    args: WirelessArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bridge: Arc<dyn DeviceBridge> = Arc::new(client.clone());
    let device = resolve_target(&bridge, args.serial.as_deref()).await?;

    let outcome = WirelessTransition::new(bridge).transition(&device).await?;

    let rendered = output::render_single(&global.output, &outcome, detail, |o| o.endpoint.clone());
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// Pick the device to transition: an explicit serial must exist, and an
/// omitted one is only unambiguous when exactly one USB device is
/// attached.
async fn resolve_target(
    bridge: &Arc<dyn DeviceBridge>,
    serial: Option<&str>,
) -> Result<Device, CliError> {
    let devices = bridge.list_devices().await?;

    if let Some(serial) = serial {
        return devices
            .into_iter()
            .find(|d| d.serial == serial)
            .ok_or_else(|| CliError::DeviceNotFound {
                serial: serial.to_owned(),
            });
    }

    let mut usb: Vec<Device> = devices
        .into_iter()
        .filter(|d| !d.is_wireless() && d.state.is_online())
        .collect();
    match usb.len() {
        1 => Ok(usb.remove(0)),
        0 => Err(CliError::AmbiguousTarget {
            reason: "no online USB device attached".into(),
        }),
        _ => Err(CliError::AmbiguousTarget {
            reason: format!(
                "multiple USB devices attached ({}); pass a serial",
                usb.iter()
                    .map(|d| d.serial.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }),
    }
}

fn detail(outcome: &TransitionOutcome) -> String {
    format!(
        "Address:  {}\nEndpoint: {}\nResult:   {}",
        outcome.address,
        outcome.endpoint,
        outcome.connect_output.trim()
    )
}
