//! Subscriber installation for the binary.
//!
//! The library never installs a global subscriber; contexts and boundaries log
//! through explicit spans. Binaries call [`initialize`] once at startup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor configuration supplies one.
pub const DEFAULT_FILTER: &str = "info";

/// Build the event filter: `RUST_LOG` wins over `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
	EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(fallback))
		.unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a `fmt` subscriber writing to stderr.
pub fn initialize(fallback: &str) -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(env_filter(fallback))
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}
