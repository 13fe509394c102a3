//! Clap derive structures for the `adbfleet` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// adbfleet -- fleet manager for Android debug-bridge devices
#[derive(Debug, Parser)]
#[command(
    name = "adbfleet",
    version,
    about = "Manage a fleet of debug-bridge devices from the command line",
    long_about = "Orchestrates multi-step device workflows over a local adb server:\n\
        moving devices from USB to wireless transports and keeping a managed\n\
        set of reverse port-forward rules in place across the whole fleet.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// adb server address (host:port)
    #[arg(long, short = 's', env = "ADBFLEET_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ADBFLEET_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Server request timeout in seconds
    #[arg(long, env = "ADBFLEET_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List attached devices
    #[command(alias = "dev", alias = "ls")]
    Devices,

    /// Move a USB device onto a wireless (TCP/IP) transport
    #[command(alias = "wifi")]
    Wireless(WirelessArgs),

    /// Manage the reverse-tunnel rule set across the fleet
    #[command(alias = "tun")]
    Tunnel(TunnelArgs),

    /// Connect to a network device at host:port
    Connect(ConnectArgs),

    /// Disconnect a network device
    Disconnect(DisconnectArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Per-command argument structs ─────────────────────────────────────

#[derive(Debug, Args)]
pub struct WirelessArgs {
    /// Device serial; may be omitted when exactly one USB device is attached
    pub serial: Option<String>,
}

#[derive(Debug, Args)]
pub struct TunnelArgs {
    #[command(subcommand)]
    pub command: TunnelCommand,
}

#[derive(Debug, Subcommand)]
pub enum TunnelCommand {
    /// Install the managed rule set on every attached device
    #[command(alias = "on")]
    Enable,

    /// Remove the managed rule set from every attached device
    #[command(alias = "off")]
    Disable,

    /// Report whether the fleet currently holds the managed rule set
    Status,

    /// List the active rules on one device
    Rules(RulesArgs),
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Device serial
    pub serial: String,
}

#[derive(Debug, Args)]
pub struct ConnectArgs {
    /// Target endpoint, host:port
    pub address: String,
}

#[derive(Debug, Args)]
pub struct DisconnectArgs {
    /// Serial of the network device (its host:port endpoint)
    pub serial: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_well_formed() {
        Cli::command().debug_assert();
    }
}
