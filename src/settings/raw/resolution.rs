use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct HostSection {
    pub(super) classpath: Option<Vec<PathBuf>>,
}

impl HostSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(classpath) = &cli.classpath {
            self.classpath = Some(classpath.clone());
        }
    }
}

/// Precedence overrides. A trailing `.` marks a package prefix.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RulesSection {
    pub(super) system: Option<Vec<String>>,
    pub(super) isolated: Option<Vec<String>>,
}

impl RulesSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(rules) = &cli.system_prefixes {
            self.system = Some(rules.clone());
        }
        if let Some(rules) = &cli.isolated_prefixes {
            self.isolated = Some(rules.clone());
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct LoggingSection {
    pub(super) suppress_host_fallback_warnings: Option<bool>,
    pub(super) filter: Option<String>,
}

impl LoggingSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if cli.no_warn_host_fallback {
            self.suppress_host_fallback_warnings = Some(true);
        }
        if let Some(filter) = cli.log_filter.clone() {
            self.filter = Some(filter);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ModulesSection {
    pub(super) startup: Option<Vec<String>>,
}

impl ModulesSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(startup) = &cli.startup_modules {
            self.startup = Some(startup.clone());
        }
    }
}

/// Trim entries and drop blanks.
pub(super) fn sanitize_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
