#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;
use strata::ContextConfig;
use strata::source_api::{Artifact, Source, SourceEntry, SourceError};
use tempfile::{TempDir, tempdir};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub fn tar_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
	let mut builder = tar::Builder::new(Vec::new());
	for (name, body) in files {
		let mut header = tar::Header::new_gnu();
		header.set_size(body.len() as u64);
		header.set_mode(0o644);
		header.set_entry_type(tar::EntryType::Regular);
		header.set_cksum();
		builder.append_data(&mut header, name, *body).unwrap();
	}
	builder.into_inner().unwrap()
}

pub fn write_tar(path: &Path, files: &[(&str, &[u8])]) {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(path, tar_bytes(files)).unwrap();
}

pub fn write_tgz(path: &Path, files: &[(&str, &[u8])]) {
	let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
	encoder.write_all(&tar_bytes(files)).unwrap();
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(path, encoder.finish().unwrap()).unwrap();
}

/// Writes a real jar: a deflated zip file.
pub fn write_jar(path: &Path, files: &[(&str, &[u8])]) {
	let mut writer = ZipWriter::new(std::io::Cursor::new(Vec::new()));
	for (name, body) in files {
		writer
			.start_file(*name, SimpleFileOptions::default())
			.unwrap();
		writer.write_all(body).unwrap();
	}
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(path, writer.finish().unwrap().into_inner()).unwrap();
}

pub fn write_file(path: &Path, bytes: &[u8]) {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(path, bytes).unwrap();
}

/// A web app root with an empty classes directory.
pub struct Webapp {
	pub dir: TempDir,
	pub config: ContextConfig,
}

impl Webapp {
	pub fn new() -> Self {
		let dir = tempdir().unwrap();
		let config = ContextConfig::new(dir.path());
		fs::create_dir_all(config.classes_path()).unwrap();
		Self { dir, config }
	}

	pub fn class(&self, path: &str, bytes: &[u8]) -> PathBuf {
		let target = self.config.classes_path().join(path);
		write_file(&target, bytes);
		target
	}

	pub fn lib(&self, name: &str, files: &[(&str, &[u8])]) -> PathBuf {
		let target = self.config.lib_path().join(name);
		write_tar(&target, files);
		target
	}
}

/// Wraps a source and counts how often it is queried.
pub struct Counting<S> {
	inner: S,
	queries: Arc<AtomicUsize>,
}

impl<S: Source> Counting<S> {
	pub fn new(inner: S) -> (Self, Arc<AtomicUsize>) {
		let queries = Arc::new(AtomicUsize::new(0));
		(
			Self {
				inner,
				queries: Arc::clone(&queries),
			},
			queries,
		)
	}
}

impl<S: Source> Source for Counting<S> {
	fn describe(&self) -> String {
		self.inner.describe()
	}

	fn entry(&self) -> Option<&SourceEntry> {
		self.inner.entry()
	}

	fn find(&self, path: &str) -> Result<Option<Artifact>, SourceError> {
		self.queries.fetch_add(1, Ordering::SeqCst);
		self.inner.find(path)
	}
}

pub fn count(counter: &AtomicUsize) -> usize {
	counter.load(Ordering::SeqCst)
}
