use std::fs;
use std::path::{Path, PathBuf};

use strata_source_api::{ArchiveSource, DirectorySource, SourceError, SourceSet};

use crate::boundary::BoundaryOptions;
use crate::rules::PrecedenceRules;

pub const DEFAULT_CONTEXT_PATH: &str = "/";
pub const DEFAULT_CLASSES_DIR: &str = "WEB-INF/classes";
pub const DEFAULT_LIB_DIR: &str = "WEB-INF/lib";

const ARCHIVE_SUFFIXES: [&str; 4] = [".tar", ".tar.gz", ".tgz", ".jar"];

/// Everything a context needs to build its generations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
	pub root: PathBuf,
	pub context_path: String,
	/// Relative to `root`.
	pub classes_dir: PathBuf,
	/// Relative to `root`.
	pub lib_dir: PathBuf,
	pub host_classpath: Vec<PathBuf>,
	pub rules: PrecedenceRules,
	pub bind_address: Option<String>,
	pub port: u16,
	pub boundary: BoundaryOptions,
	/// Class names defined on every start.
	pub startup_modules: Vec<String>,
}

impl Default for ContextConfig {
	fn default() -> Self {
		Self {
			root: PathBuf::from("."),
			context_path: DEFAULT_CONTEXT_PATH.to_string(),
			classes_dir: PathBuf::from(DEFAULT_CLASSES_DIR),
			lib_dir: PathBuf::from(DEFAULT_LIB_DIR),
			host_classpath: Vec::new(),
			rules: PrecedenceRules::empty(),
			bind_address: None,
			port: 0,
			boundary: BoundaryOptions::default(),
			startup_modules: Vec::new(),
		}
	}
}

impl ContextConfig {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self {
			root: root.into(),
			..Self::default()
		}
	}

	pub fn classes_path(&self) -> PathBuf {
		self.root.join(&self.classes_dir)
	}

	pub fn lib_path(&self) -> PathBuf {
		self.root.join(&self.lib_dir)
	}

	/// Open the application tree: the classes directory first, then every
	/// archive in the lib directory sorted by file name.
	///
	/// Both directories are optional, the root is not. Archives are re-read on
	/// every call, so each generation sees the bytes on disk at its start.
	pub fn isolated_tree(&self) -> Result<SourceSet, SourceError> {
		let metadata = fs::metadata(&self.root).map_err(|err| SourceError::io(&self.root, err))?;
		if !metadata.is_dir() {
			return Err(SourceError::UnsupportedEntry {
				path: self.root.clone(),
			});
		}

		let mut tree = SourceSet::new();
		let classes = self.classes_path();
		if classes.is_dir() {
			tree = tree.with(DirectorySource::open(&classes)?);
		}

		for archive in lib_archives(&self.lib_path())? {
			tree = tree.with(ArchiveSource::open(&archive)?);
		}
		Ok(tree)
	}
}

fn lib_archives(lib: &Path) -> Result<Vec<PathBuf>, SourceError> {
	if !lib.is_dir() {
		return Ok(Vec::new());
	}

	let mut archives = Vec::new();
	for entry in fs::read_dir(lib).map_err(|err| SourceError::io(lib, err))? {
		let entry = entry.map_err(|err| SourceError::io(lib, err))?;
		let path = entry.path();
		let is_archive = path.is_file()
			&& path
				.file_name()
				.and_then(|name| name.to_str())
				.is_some_and(|name| ARCHIVE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)));
		if is_archive {
			archives.push(path);
		}
	}
	archives.sort();
	Ok(archives)
}
