use std::fmt;

use serde::Serialize;

/// Lifecycle state of a [`ReloadableContext`](super::ReloadableContext).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextState {
	Stopped,
	Starting,
	Running,
	Stopping,
	/// A start or stop failed. Only `start` is accepted from here.
	Failed,
}

impl ContextState {
	pub fn can_start(self) -> bool {
		matches!(self, Self::Stopped | Self::Failed)
	}

	pub fn is_running(self) -> bool {
		self == Self::Running
	}
}

impl fmt::Display for ContextState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Stopped => "stopped",
			Self::Starting => "starting",
			Self::Running => "running",
			Self::Stopping => "stopping",
			Self::Failed => "failed",
		})
	}
}
