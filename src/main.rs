mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::ResolveWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	let resolved = settings::load(&cli)?;

	strata::logging::initialize(&resolved.log_filter)?;

	if cli.print_config {
		resolved.print_summary();
		if cli.names.is_empty() {
			return Ok(());
		}
	}

	run_resolve(cli.output, &resolved, cli.names, cli.reload)
}

/// Resolve the requested names and print output in the chosen format.
fn run_resolve(
	format: OutputFormat,
	settings: &ResolvedConfig,
	names: Vec<String>,
	reload: bool,
) -> Result<()> {
	let workflow = ResolveWorkflow::from_config(settings, names, reload)?;
	let report = workflow.run()?;

	match format {
		OutputFormat::Plain => print_plain(&report),
		OutputFormat::Json => print_json(&report)?,
	}

	Ok(())
}
