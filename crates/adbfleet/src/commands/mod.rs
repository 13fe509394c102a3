//! Command dispatch: bridges CLI args -> core orchestrators -> output
//! formatting.

pub mod config_cmd;
pub mod connect;
pub mod devices;
pub mod tunnel;
pub mod wireless;

use adbfleet_bridge::AdbClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, client: &AdbClient, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices => devices::handle(client, global).await,
        Command::Wireless(args) => wireless::handle(client, args, global).await,
        Command::Tunnel(args) => tunnel::handle(client, args, global).await,
        Command::Connect(args) => connect::handle_connect(client, args, global).await,
        Command::Disconnect(args) => connect::handle_disconnect(client, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
