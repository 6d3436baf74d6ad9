use crate::boundary::IsolationBoundary;

/// Callbacks run around every boundary generation.
///
/// `on_start` runs before the new boundary is published; an error aborts the
/// start and leaves the context `Failed`. `on_stop` runs after the boundary has
/// been unpublished and retired.
pub trait LifecycleListener: Send + Sync {
	fn name(&self) -> &str;

	fn on_start(&self, boundary: &IsolationBoundary) -> anyhow::Result<()> {
		let _ = boundary;
		Ok(())
	}

	fn on_stop(&self, boundary: &IsolationBoundary) -> anyhow::Result<()> {
		let _ = boundary;
		Ok(())
	}
}
