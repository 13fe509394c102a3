//! Configuration inspection commands.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let config = config::load()?;
    let rendered = match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Plain => {
            output::render_single(&global.output, &config, |_| String::new(), |c| c.server.clone())
        }
        OutputFormat::Table => toml::to_string_pretty(&config).map_err(|e| CliError::Validation {
            field: "config".into(),
            reason: e.to_string(),
        })?,
    };
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}
