use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::cli::CliArgs;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ServerSection {
    pub(super) bind_address: Option<String>,
    pub(super) port: Option<u32>,
}

impl ServerSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(bind) = cli.bind.clone() {
            self.bind_address = Some(bind);
        }
        if let Some(port) = cli.port {
            self.port = Some(port);
        }
    }
}

/// Where the web app lives on disk, as read from configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct WebappSection {
    pub(super) root: Option<PathBuf>,
    pub(super) context_path: Option<String>,
    pub(super) classes_dir: Option<PathBuf>,
    pub(super) lib_dir: Option<PathBuf>,
}

impl WebappSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(root) = cli.root.clone() {
            self.root = Some(root);
        }
        if let Some(path) = cli.context_path.clone() {
            self.context_path = Some(path);
        }
        if let Some(dir) = cli.classes_dir.clone() {
            self.classes_dir = Some(dir);
        }
        if let Some(dir) = cli.lib_dir.clone() {
            self.lib_dir = Some(dir);
        }
    }

    /// Absolute, canonical web app root. Defaults to the working directory.
    pub(super) fn resolve_root(&self) -> Result<PathBuf> {
        let mut root = match &self.root {
            Some(path) => path.clone(),
            None => env::current_dir().context("failed to determine working directory")?,
        };
        if root.is_relative() {
            root = env::current_dir()
                .context("failed to resolve current directory for root")?
                .join(root);
        }
        root = fs::canonicalize(&root)
            .with_context(|| format!("failed to canonicalize web app root {}", root.display()))?;

        let metadata = fs::metadata(&root)
            .with_context(|| format!("failed to inspect web app root {}", root.display()))?;
        ensure!(metadata.is_dir(), "web app root must be a directory");
        Ok(root)
    }
}
