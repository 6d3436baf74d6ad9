use std::path::PathBuf;

use strata::{BoundaryOptions, ContextConfig, PrecedenceRules};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub root: PathBuf,
	pub context_path: String,
	pub classes_dir: PathBuf,
	pub lib_dir: PathBuf,
	pub bind_address: Option<String>,
	pub port: u32,
	pub host_classpath: Vec<PathBuf>,
	pub system_rules: Vec<String>,
	pub isolated_rules: Vec<String>,
	pub startup_modules: Vec<String>,
	pub warn_on_host_fallback: bool,
	pub log_filter: String,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}

	/// Context configuration for a validated config.
	pub fn context_config(&self) -> ContextConfig {
		ContextConfig {
			root: self.root.clone(),
			context_path: self.context_path.clone(),
			classes_dir: self.classes_dir.clone(),
			lib_dir: self.lib_dir.clone(),
			host_classpath: self.host_classpath.clone(),
			rules: PrecedenceRules::new(&self.system_rules, &self.isolated_rules),
			bind_address: self.bind_address.clone(),
			port: u16::try_from(self.port).unwrap_or_default(),
			boundary: BoundaryOptions {
				warn_on_host_fallback: self.warn_on_host_fallback,
			},
			startup_modules: self.startup_modules.clone(),
		}
	}
}
