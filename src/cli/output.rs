use anyhow::Result;

use crate::workflow::{LookupOutcome, Report};

/// Print a plain-text representation of the report.
pub(crate) fn print_plain(report: &Report) {
	for pass in &report.passes {
		println!("generation {}", pass.generation);
		for lookup in &pass.lookups {
			match &lookup.outcome {
				LookupOutcome::Found { location, bytes } => {
					println!("  {} -> {location} ({bytes} bytes)", lookup.name);
				}
				LookupOutcome::NotFound => println!("  {} -> not found", lookup.name),
				LookupOutcome::Invalid { error } => {
					println!("  {} -> invalid name: {error}", lookup.name);
				}
			}
		}
		for record in &pass.provenance {
			let marker = if record.warned { "warned" } else { "quiet" };
			println!(
				"  admitted {} for {} ({marker})",
				record.containing, record.name
			);
		}
	}
}

/// Format the report as a JSON string.
pub(crate) fn format_report_json(report: &Report) -> Result<String> {
	Ok(serde_json::to_string_pretty(report)?)
}

/// Print the JSON representation of the report.
pub(crate) fn print_json(report: &Report) -> Result<()> {
	println!("{}", format_report_json(report)?);
	Ok(())
}
