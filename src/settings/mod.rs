//! Configuration loading and resolution.
//!
//! Values are layered from default files, explicit `--config` files, the
//! `STRATA__SECTION__KEY` environment and finally CLI flags. `load` validates
//! the merged result and returns a [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
