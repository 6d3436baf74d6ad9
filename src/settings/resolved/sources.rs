use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated setting came from, when it was set at all.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) server_port: Option<SettingSource>,
	pub(crate) webapp_context_path: Option<SettingSource>,
	pub(crate) webapp_classes_dir: Option<SettingSource>,
	pub(crate) webapp_lib_dir: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_port(&self) -> SettingSource {
		self.server_port
			.clone()
			.unwrap_or(SettingSource::ConfigKey("server.port"))
	}

	pub(crate) fn source_for_context_path(&self) -> SettingSource {
		self.webapp_context_path
			.clone()
			.unwrap_or(SettingSource::ConfigKey("webapp.context_path"))
	}

	pub(crate) fn source_for_classes_dir(&self) -> SettingSource {
		self.webapp_classes_dir
			.clone()
			.unwrap_or(SettingSource::ConfigKey("webapp.classes_dir"))
	}

	pub(crate) fn source_for_lib_dir(&self) -> SettingSource {
		self.webapp_lib_dir
			.clone()
			.unwrap_or(SettingSource::ConfigKey("webapp.lib_dir"))
	}
}
