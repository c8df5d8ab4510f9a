mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{DEFAULT_LOG_LEVEL, OutputFormat, parse_cli, print_json, print_plain};
use scour::logging;
use workflow::Workflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let Some(command) = cli.command else {
		return Ok(());
	};

	let report = Workflow::from_config(&resolved).run(command)?;

	match cli.output {
		OutputFormat::Plain => print_plain(&report),
		OutputFormat::Json => print_json(&report)?,
	}

	Ok(())
}
