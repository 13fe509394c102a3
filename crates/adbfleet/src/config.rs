//! CLI-owned configuration: TOML file plus `ADBFLEET_*` env overrides,
//! resolved into an `adbfleet_bridge::BridgeConfig`.
//!
//! Precedence, lowest to highest: built-in defaults, config file,
//! environment, command-line flags.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use adbfleet_bridge::BridgeConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// adb server address, host:port.
    #[serde(default = "default_server")]
    pub server: String,

    /// Server request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout: default_timeout(),
        }
    }
}

fn default_server() -> String {
    adbfleet_bridge::DEFAULT_SERVER_ADDR.to_owned()
}

fn default_timeout() -> u64 {
    10
}

/// Path of the TOML config file (`~/.config/adbfleet/config.toml` on
/// Linux).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "adbfleet")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("adbfleet.toml"))
}

/// Load the layered configuration. A missing file is fine; a malformed
/// one is an error.
pub fn load() -> Result<Config, CliError> {
    let config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("ADBFLEET_"))
        .extract()?;
    Ok(config)
}

/// Resolve file/env config and CLI flags into a transport config.
pub fn resolve_bridge_config(config: &Config, global: &GlobalOpts) -> Result<BridgeConfig, CliError> {
    let server = global.server.as_deref().unwrap_or(&config.server);
    let addr: SocketAddr = server.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("expected host:port, got '{server}'"),
    })?;
    let timeout = Duration::from_secs(global.timeout.unwrap_or(config.timeout));
    Ok(BridgeConfig { addr, timeout })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn bare_global() -> GlobalOpts {
        GlobalOpts {
            server: None,
            output: crate::cli::OutputFormat::Table,
            color: crate::cli::ColorMode::Auto,
            verbose: 0,
            quiet: false,
            timeout: None,
        }
    }

    #[test]
    fn defaults_point_at_local_server() {
        let config = Config::default();
        let bridge = resolve_bridge_config(&config, &bare_global()).unwrap();
        assert_eq!(bridge.addr.port(), 5037);
        assert_eq!(bridge.timeout, Duration::from_secs(10));
    }

    #[test]
    fn flags_override_file_values() {
        let config = Config {
            server: "10.0.0.9:5037".into(),
            timeout: 30,
        };
        let mut global = bare_global();
        global.server = Some("127.0.0.1:6000".into());
        global.timeout = Some(3);

        let bridge = resolve_bridge_config(&config, &global).unwrap();
        assert_eq!(bridge.addr.to_string(), "127.0.0.1:6000");
        assert_eq!(bridge.timeout, Duration::from_secs(3));
    }

    #[test]
    fn unparseable_server_is_a_usage_error() {
        let config = Config {
            server: "not-an-address".into(),
            timeout: 10,
        };
        let err = resolve_bridge_config(&config, &bare_global()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
