//! Precedence rules deciding which side of the isolation boundary may answer a name.

use std::fmt;

use serde::Serialize;

/// Outcome of classifying a dotted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
	/// Only the host classpath may answer.
	ForcedSystem,
	/// Only the isolated tree may answer, even if the host has a copy.
	ForcedIsolated,
	/// Isolated tree first, host as an admitted fallback.
	Default,
}

impl fmt::Display for Classification {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::ForcedSystem => "forced-system",
			Self::ForcedIsolated => "forced-isolated",
			Self::Default => "default",
		})
	}
}

/// One configured pattern.
///
/// `a.b.` matches everything in package `a.b`; `a.b.C` matches that name and
/// its nested names (`a.b.C$Inner`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
	pattern: String,
	prefix: bool,
}

impl Rule {
	/// Parse a configured rule. Slashes are accepted in place of dots; blank
	/// rules yield `None`.
	pub fn parse(raw: &str) -> Option<Self> {
		let pattern = raw.trim().replace('/', ".");
		if pattern.is_empty() || pattern == "." {
			return None;
		}
		let prefix = pattern.ends_with('.');
		Some(Self { pattern, prefix })
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the rule's specificity when it matches.
	fn specificity(&self, dotted: &str) -> Option<usize> {
		let matched = if self.prefix {
			dotted.starts_with(&self.pattern)
		} else {
			dotted
				.strip_prefix(self.pattern.as_str())
				.is_some_and(|rest| rest.is_empty() || rest.starts_with('$'))
		};
		matched.then_some(self.pattern.len())
	}
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.pattern)
	}
}

/// Immutable rule set shared by every boundary generation of a context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceRules {
	system: Vec<Rule>,
	isolated: Vec<Rule>,
}

impl PrecedenceRules {
	pub fn new<S, I>(system: S, isolated: I) -> Self
	where
		S: IntoIterator,
		S::Item: AsRef<str>,
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		Self {
			system: parse_all(system),
			isolated: parse_all(isolated),
		}
	}

	/// No overrides: every name takes the default path.
	pub fn empty() -> Self {
		Self::default()
	}

	/// The longest matching rule decides. A system rule and an isolated rule of
	/// equal length resolve to [`Classification::ForcedIsolated`].
	pub fn classify(&self, dotted: &str) -> Classification {
		let system = best_match(&self.system, dotted);
		let isolated = best_match(&self.isolated, dotted);
		match (system, isolated) {
			(None, None) => Classification::Default,
			(Some(_), None) => Classification::ForcedSystem,
			(None, Some(_)) => Classification::ForcedIsolated,
			(Some(system), Some(isolated)) if system > isolated => Classification::ForcedSystem,
			(Some(_), Some(_)) => Classification::ForcedIsolated,
		}
	}

	pub fn system(&self) -> &[Rule] {
		&self.system
	}

	pub fn isolated(&self) -> &[Rule] {
		&self.isolated
	}

	pub fn is_empty(&self) -> bool {
		self.system.is_empty() && self.isolated.is_empty()
	}
}

fn parse_all<I>(rules: I) -> Vec<Rule>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	rules
		.into_iter()
		.filter_map(|rule| Rule::parse(rule.as_ref()))
		.collect()
}

fn best_match(rules: &[Rule], dotted: &str) -> Option<usize> {
	rules.iter().filter_map(|rule| rule.specificity(dotted)).max()
}
