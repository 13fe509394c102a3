//! Device listing.

use tabled::Tabled;

use adbfleet_bridge::AdbClient;
use adbfleet_core::{Device, DeviceBridge};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Transport")]
    transport: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            serial: d.serial.clone(),
            transport: d.transport.to_string(),
            state: d.state.to_string(),
            model: d.model.clone().unwrap_or_else(|| "-".into()),
            name: d.name.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

pub async fn handle(client: &AdbClient, global: &GlobalOpts) -> Result<(), CliError> {
    let devices = DeviceBridge::list_devices(client).await?;

    // JSON consumers get an empty array; humans get a sentence.
    if devices.is_empty() && matches!(global.output, OutputFormat::Table | OutputFormat::Plain) {
        output::print_output("No devices attached", global.quiet);
        return Ok(());
    }

    let rendered = output::render_list(&global.output, &devices, |d| DeviceRow::from(d), |d| {
        d.serial.clone()
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}
