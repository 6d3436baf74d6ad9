use strata_source_api::{AdmissionError, Artifact, Location, SourceEntry};
use tracing::{debug, error, warn};

use super::IsolationBoundary;
use crate::name::ResourceName;
use crate::provenance::ProvenanceRecord;

impl IsolationBoundary {
	/// Bring a host-side artifact into the boundary.
	///
	/// The containing directory or archive is appended to the admitted sources
	/// so that the artifact, and anything else in the same entry, is served by
	/// the boundary itself. The admission lock covers only the provenance check
	/// and the source-set mutation; the final lookup runs outside it.
	pub(super) fn admit(&self, name: &ResourceName, found: Artifact) -> Option<Artifact> {
		if self.is_retired() {
			debug!(parent: &self.span, name = %name, "boundary retired, not admitting host entry");
			return None;
		}

		{
			let _admission = self.admission.lock();
			if !self.provenance.contains(name.path()) {
				let (containing, added) = match self.admit_location(name, found.location()) {
					Ok(admitted) => admitted,
					Err(err) => {
						error!(
							parent: &self.span,
							name = %name,
							location = %found.location(),
							error = %err,
							"failed to admit host classpath entry"
						);
						return None;
					}
				};

				// The fallback is reported only once the entry is admitted.
				let warned = self.options.warn_on_host_fallback;
				if warned {
					warn!(
						parent: &self.span,
						name = %name,
						location = %found.location(),
						"resource could not be found in the web app, but was found on the host classpath"
					);
				} else {
					debug!(
						parent: &self.span,
						name = %name,
						location = %found.location(),
						"resource could not be found in the web app, but was found on the host classpath"
					);
				}
				if added && warned {
					warn!(
						parent: &self.span,
						containing = %containing,
						"adding classpath entry to the web app classpath for this session"
					);
				} else if added {
					debug!(
						parent: &self.span,
						containing = %containing,
						"adding classpath entry to the web app classpath for this session"
					);
				}

				self.provenance.record(ProvenanceRecord {
					name: name.path().to_string(),
					location: found.location().clone(),
					containing,
					warned,
				});
			}
		}

		self.find_isolated(name.path())
	}

	fn admit_location(
		&self,
		name: &ResourceName,
		location: &Location,
	) -> Result<(SourceEntry, bool), AdmissionError> {
		let containing = location.containing_entry(name.path())?;
		if self.tree.contains_entry(&containing) || self.admitted.read().contains_entry(&containing)
		{
			return Ok((containing, false));
		}

		let source = containing.open().map_err(|source| AdmissionError::Open {
			entry: containing.to_string(),
			source,
		})?;
		self.admitted.write().push(source);
		Ok((containing, true))
	}
}
