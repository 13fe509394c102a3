//! Manual connect / disconnect for network devices.

use adbfleet_bridge::AdbClient;
use adbfleet_core::DeviceBridge;

use crate::cli::{ConnectArgs, DisconnectArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub async fn handle_connect(
    client: &AdbClient,
    args: ConnectArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // The server answers OKAY with result text either way; "failed" and
    // "cannot connect" outcomes arrive as text, so surface it verbatim.
    let result = DeviceBridge::connect(client, &args.address).await?;
    if result.contains("failed") || result.contains("cannot connect") {
        return Err(CliError::ConnectFailed {
            address: args.address,
            output: result.trim().to_owned(),
        });
    }
    output::print_output(result.trim(), global.quiet);
    Ok(())
}

pub async fn handle_disconnect(
    client: &AdbClient,
    args: DisconnectArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    DeviceBridge::disconnect(client, &args.serial).await?;
    output::print_output(&format!("Disconnected {}", args.serial), global.quiet);
    Ok(())
}
