use std::path::Path;

use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if u16::try_from(config.port).is_err() {
		return Err(ConfigError::invalid(
			"server.port",
			config.port.to_string(),
			sources.source_for_port(),
			"must be between 0 and 65535",
		));
	}

	if !config.context_path.starts_with('/') {
		return Err(ConfigError::invalid(
			"webapp.context_path",
			config.context_path.clone(),
			sources.source_for_context_path(),
			"must start with '/'",
		));
	}

	check_relative(
		"webapp.classes_dir",
		&config.classes_dir,
		sources.source_for_classes_dir(),
	)?;
	check_relative(
		"webapp.lib_dir",
		&config.lib_dir,
		sources.source_for_lib_dir(),
	)?;

	Ok(())
}

fn check_relative(
	key: &'static str,
	path: &Path,
	origin: super::SettingSource,
) -> Result<(), ConfigError> {
	if path.as_os_str().is_empty() || path.is_absolute() {
		return Err(ConfigError::invalid(
			key,
			path.display().to_string(),
			origin,
			"must be a non-empty path relative to the web app root",
		));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::super::SettingSource;
	use super::*;

	fn config() -> ResolvedConfig {
		ResolvedConfig {
			root: PathBuf::from("/srv/app"),
			context_path: "/".into(),
			classes_dir: PathBuf::from("WEB-INF/classes"),
			lib_dir: PathBuf::from("WEB-INF/lib"),
			bind_address: None,
			port: 0,
			host_classpath: Vec::new(),
			system_rules: Vec::new(),
			isolated_rules: Vec::new(),
			startup_modules: Vec::new(),
			warn_on_host_fallback: true,
			log_filter: "info".into(),
		}
	}

	#[test]
	fn defaults_are_valid() {
		assert!(validate(&config(), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_out_of_range_ports() {
		let config = ResolvedConfig {
			port: 65536,
			..config()
		};
		let sources = ConfigSources {
			server_port: Some(SettingSource::Environment("STRATA__SERVER__PORT")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "server.port"));
		let message = err.to_string();
		assert!(message.contains("value: 65536"));
		assert!(message.contains("environment variable"));
	}

	#[test]
	fn validation_rejects_empty_context_paths() {
		let config = ResolvedConfig {
			context_path: String::new(),
			..config()
		};
		let sources = ConfigSources {
			webapp_context_path: Some(SettingSource::CliFlag("--context-path")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "webapp.context_path"));
		assert!(err.to_string().contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_absolute_lib_dirs() {
		let config = ResolvedConfig {
			lib_dir: PathBuf::from("/opt/lib"),
			..config()
		};

		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert!(matches!(err.key, "webapp.lib_dir"));
		assert!(err.to_string().contains("configuration key `webapp.lib_dir`"));
	}
}
