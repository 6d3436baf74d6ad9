//! Resource and class names as requested by callers.
//!
//! Every lookup goes through a [`ResourceName`], which carries two derived
//! forms: the slash-separated `path` used to query sources, and the dotted
//! form used to classify the name against precedence rules.

use std::fmt;

use thiserror::Error;

/// Service descriptors are classified by the interface they name, not by the
/// directory they live in.
pub const SERVICES_PREFIX: &str = "META-INF/services/";

const CLASS_SUFFIX: &str = ".class";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameKind {
	/// A dotted class name such as `a.b.C`.
	Class,
	/// A slash-separated resource path such as `a/b/c.txt`.
	Resource,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
	#[error("empty resource name")]
	Empty,
	#[error("resource name '{raw}' escapes its root")]
	ParentSegment { raw: String },
	#[error("'{raw}' is not a valid class name")]
	InvalidClassName { raw: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName {
	raw: String,
	path: String,
	dotted: String,
	kind: NameKind,
}

impl ResourceName {
	/// A class name, resolved from `a/b/C.class`.
	pub fn class(name: &str) -> Result<Self, NameError> {
		let trimmed = name.trim();
		if trimmed.is_empty() {
			return Err(NameError::Empty);
		}
		let valid = !trimmed.contains(['/', '\\'])
			&& trimmed.split('.').all(|segment| !segment.is_empty());
		if !valid {
			return Err(NameError::InvalidClassName {
				raw: name.to_string(),
			});
		}

		Ok(Self {
			raw: name.to_string(),
			path: format!("{}{CLASS_SUFFIX}", trimmed.replace('.', "/")),
			dotted: trimmed.to_string(),
			kind: NameKind::Class,
		})
	}

	/// A resource path. Backslashes, leading slashes and `.` segments are
	/// normalized away; `..` is rejected.
	pub fn resource(name: &str) -> Result<Self, NameError> {
		let unified = name.trim().replace('\\', "/");
		let mut segments = Vec::new();
		for segment in unified.split('/') {
			match segment {
				"" | "." => {}
				".." => {
					return Err(NameError::ParentSegment {
						raw: name.to_string(),
					});
				}
				other => segments.push(other),
			}
		}
		if segments.is_empty() {
			return Err(NameError::Empty);
		}

		let path = segments.join("/");
		let dotted = classification_form(&path);
		Ok(Self {
			raw: name.to_string(),
			path,
			dotted,
			kind: NameKind::Resource,
		})
	}

	/// Guess the kind from free-form input: anything with a separator or a
	/// `.class` suffix is a resource, the rest are class names.
	pub fn parse(raw: &str) -> Result<Self, NameError> {
		let trimmed = raw.trim();
		if trimmed.contains(['/', '\\']) || trimmed.ends_with(CLASS_SUFFIX) {
			Self::resource(raw)
		} else {
			Self::class(raw)
		}
	}

	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Slash-separated path used to query sources.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Dotted form used for classification.
	pub fn dotted(&self) -> &str {
		&self.dotted
	}

	pub fn kind(&self) -> NameKind {
		self.kind
	}
}

impl fmt::Display for ResourceName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.kind {
			NameKind::Class => f.write_str(&self.dotted),
			NameKind::Resource => f.write_str(&self.path),
		}
	}
}

fn classification_form(path: &str) -> String {
	let stripped = path.strip_prefix(SERVICES_PREFIX).unwrap_or(path);
	let stripped = stripped.strip_suffix(CLASS_SUFFIX).unwrap_or(stripped);
	stripped.replace('/', ".")
}
