//! Tunnel reconciliation commands.

use std::sync::Arc;

use owo_colors::OwoColorize;
use tabled::Tabled;

use adbfleet_bridge::AdbClient;
use adbfleet_core::{ApplyOutcome, DeviceApplyRow, DeviceBridge, TunnelReconciler, TunnelRule};

use crate::cli::{GlobalOpts, OutputFormat, TunnelArgs, TunnelCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(client: &AdbClient, args: TunnelArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let bridge: Arc<dyn DeviceBridge> = Arc::new(client.clone());
    let reconciler = TunnelReconciler::new(bridge);

    match args.command {
        TunnelCommand::Enable => apply(&reconciler, true, global).await,
        TunnelCommand::Disable => apply(&reconciler, false, global).await,
        TunnelCommand::Status => status(&reconciler, global).await,
        TunnelCommand::Rules(args) => rules(&reconciler, &args.serial, global).await,
    }
}

#[derive(Tabled)]
struct ApplyTableRow {
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Result")]
    result: String,
}

#[derive(Tabled)]
struct RuleTableRow {
    #[tabled(rename = "Device port")]
    remote: u16,
    #[tabled(rename = "Host port")]
    local: u16,
}

async fn apply(
    reconciler: &TunnelReconciler,
    desired: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let results = match reconciler.apply(desired).await? {
        ApplyOutcome::NoDevices => {
            if matches!(global.output, OutputFormat::Json | OutputFormat::JsonCompact) {
                output::print_output("[]", global.quiet);
            } else {
                output::print_output("No devices attached", global.quiet);
            }
            return Ok(());
        }
        ApplyOutcome::Applied(results) => results,
    };

    let color = output::should_color(&global.color);
    let rows: Vec<DeviceApplyRow> = results.iter().map(DeviceApplyRow::from).collect();
    let rendered = output::render_list(
        &global.output,
        &rows,
        |row| apply_table_row(row, color),
        |row| row.serial.clone(),
    );
    output::print_output(&rendered, global.quiet);

    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        return Err(CliError::PartialFailure {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

fn apply_table_row(row: &DeviceApplyRow, color: bool) -> ApplyTableRow {
    let result = match (&row.error, color) {
        (None, true) => "ok".green().to_string(),
        (None, false) => "ok".to_string(),
        (Some(e), true) => format!("{}: {e}", "failed".red()),
        (Some(e), false) => format!("failed: {e}"),
    };
    ApplyTableRow {
        serial: row.serial.clone(),
        result,
    }
}

async fn status(reconciler: &TunnelReconciler, global: &GlobalOpts) -> Result<(), CliError> {
    let reconciled = reconciler.is_reconciled().await;
    let rendered = match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact => {
            format!("{{\"reconciled\":{reconciled}}}")
        }
        OutputFormat::Plain => reconciled.to_string(),
        OutputFormat::Table => {
            if reconciled {
                "Tunnels active: managed rule set is in place".to_owned()
            } else {
                "Tunnels inactive: managed rule set is not in place".to_owned()
            }
        }
    };
    output::print_output(&rendered, global.quiet);
    Ok(())
}

async fn rules(
    reconciler: &TunnelReconciler,
    serial: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let rules = reconciler.device_rules(serial).await?;

    if rules.is_empty() && matches!(global.output, OutputFormat::Table | OutputFormat::Plain) {
        output::print_output("No reverse rules active", global.quiet);
        return Ok(());
    }

    let rendered = output::render_list(
        &global.output,
        &rules,
        |r: &TunnelRule| RuleTableRow {
            remote: r.remote_port,
            local: r.local_port,
        },
        |r| format!("{}:{}", r.remote_port, r.local_port),
    );
    output::print_output(&rendered, global.quiet);
    Ok(())
}
