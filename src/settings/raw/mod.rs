use std::env;
use std::path::PathBuf;

use anyhow::{Error, Result};
use serde::Deserialize;

use strata::context::{DEFAULT_CLASSES_DIR, DEFAULT_CONTEXT_PATH, DEFAULT_LIB_DIR};
use strata::logging::DEFAULT_FILTER;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod resolution;
mod webapp;

use resolution::{
    HostSection, LoggingSection, ModulesSection, RulesSection, sanitize_list,
};
use webapp::{ServerSection, WebappSection};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    server: ServerSection,
    webapp: WebappSection,
    host: HostSection,
    rules: RulesSection,
    logging: LoggingSection,
    modules: ModulesSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.server.apply_cli_overrides(cli);
        self.webapp.apply_cli_overrides(cli);
        self.host.apply_cli_overrides(cli);
        self.rules.apply_cli_overrides(cli);
        self.logging.apply_cli_overrides(cli);
        self.modules.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            server_port: detect_source(
                cli.port.is_some(),
                self.server.port.is_some(),
                "STRATA__SERVER__PORT",
                "--port",
                "server.port",
            ),
            webapp_context_path: detect_source(
                cli.context_path.is_some(),
                self.webapp.context_path.is_some(),
                "STRATA__WEBAPP__CONTEXT_PATH",
                "--context-path",
                "webapp.context_path",
            ),
            webapp_classes_dir: detect_source(
                cli.classes_dir.is_some(),
                self.webapp.classes_dir.is_some(),
                "STRATA__WEBAPP__CLASSES_DIR",
                "--classes-dir",
                "webapp.classes_dir",
            ),
            webapp_lib_dir: detect_source(
                cli.lib_dir.is_some(),
                self.webapp.lib_dir.is_some(),
                "STRATA__WEBAPP__LIB_DIR",
                "--lib-dir",
                "webapp.lib_dir",
            ),
        };

        let root = self.webapp.resolve_root()?;

        let config = ResolvedConfig {
            root,
            context_path: self
                .webapp
                .context_path
                .unwrap_or_else(|| DEFAULT_CONTEXT_PATH.to_string()),
            classes_dir: self
                .webapp
                .classes_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLASSES_DIR)),
            lib_dir: self
                .webapp
                .lib_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LIB_DIR)),
            bind_address: self
                .server
                .bind_address
                .map(|bind| bind.trim().to_string())
                .filter(|bind| !bind.is_empty()),
            port: self.server.port.unwrap_or(0),
            host_classpath: self.host.classpath.unwrap_or_default(),
            system_rules: self.rules.system.map(sanitize_list).unwrap_or_default(),
            isolated_rules: self.rules.isolated.map(sanitize_list).unwrap_or_default(),
            startup_modules: self.modules.startup.map(sanitize_list).unwrap_or_default(),
            warn_on_host_fallback: !self
                .logging
                .suppress_host_fallback_warnings
                .unwrap_or(false),
            log_filter: self
                .logging
                .filter
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
