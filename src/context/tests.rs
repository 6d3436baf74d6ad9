use std::any::Any;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::bail;
use strata_source_api::{
	Artifact, MemorySource, Module, ModuleDescriptor, ModuleFactory, ModuleRegistry,
};
use tempfile::{TempDir, tempdir};

use super::*;

fn webapp() -> (TempDir, ContextConfig) {
	let dir = tempdir().unwrap();
	let config = ContextConfig::new(dir.path());
	fs::create_dir_all(config.classes_path().join("app")).unwrap();
	fs::write(config.classes_path().join("app/Main.class"), b"v1").unwrap();
	(dir, config)
}

#[derive(Default)]
struct Recorder {
	starts: AtomicUsize,
	stops: AtomicUsize,
	fail_start: AtomicBool,
	fail_stop: AtomicBool,
}

struct RecordingListener(Arc<Recorder>);

impl LifecycleListener for RecordingListener {
	fn name(&self) -> &str {
		"recorder"
	}

	fn on_start(&self, _boundary: &IsolationBoundary) -> anyhow::Result<()> {
		self.0.starts.fetch_add(1, Ordering::SeqCst);
		if self.0.fail_start.load(Ordering::SeqCst) {
			bail!("refusing to start");
		}
		Ok(())
	}

	fn on_stop(&self, boundary: &IsolationBoundary) -> anyhow::Result<()> {
		assert!(boundary.is_retired());
		self.0.stops.fetch_add(1, Ordering::SeqCst);
		if self.0.fail_stop.load(Ordering::SeqCst) {
			bail!("refusing to stop");
		}
		Ok(())
	}
}

fn context_with_recorder(config: ContextConfig) -> (ReloadableContext, Arc<Recorder>) {
	let recorder = Arc::new(Recorder::default());
	let context = ReloadableContext::builder(config)
		.listener(RecordingListener(Arc::clone(&recorder)))
		.build()
		.unwrap();
	(context, recorder)
}

#[test]
fn new_contexts_are_stopped_and_resolve_nothing() {
	let (_dir, config) = webapp();
	let context = ReloadableContext::builder(config).build().unwrap();

	assert_eq!(context.state(), ContextState::Stopped);
	assert_eq!(context.generation(), None);
	assert!(context.lookup("app.Main").is_none());
	assert!(matches!(
		context.define(&ResourceName::class("app.Main").unwrap()),
		Err(DefineError::NotRunning)
	));
}

#[test]
fn start_stop_walks_the_state_machine() {
	let (_dir, config) = webapp();
	let (context, recorder) = context_with_recorder(config);

	assert_eq!(context.start().unwrap(), Generation::FIRST);
	assert_eq!(context.state(), ContextState::Running);
	assert_eq!(context.lookup("app.Main").unwrap().bytes(), b"v1");

	assert_eq!(context.stop().unwrap(), Generation::FIRST);
	assert_eq!(context.state(), ContextState::Stopped);
	assert!(context.lookup("app.Main").is_none());
	assert_eq!(recorder.starts.load(Ordering::SeqCst), 1);
	assert_eq!(recorder.stops.load(Ordering::SeqCst), 1);
}

#[test]
fn invalid_transitions_leave_the_state_alone() {
	let (_dir, config) = webapp();
	let context = ReloadableContext::builder(config).build().unwrap();

	assert!(matches!(
		context.stop(),
		Err(LifecycleError::InvalidState {
			operation: "stop",
			state: ContextState::Stopped
		})
	));
	assert!(matches!(
		context.reload(),
		Err(LifecycleError::InvalidState {
			operation: "reload",
			..
		})
	));
	assert_eq!(context.state(), ContextState::Stopped);

	context.start().unwrap();
	assert!(matches!(
		context.start(),
		Err(LifecycleError::InvalidState {
			operation: "start",
			state: ContextState::Running
		})
	));
	assert_eq!(context.state(), ContextState::Running);
	assert_eq!(context.generation(), Some(Generation::FIRST));
}

#[test]
fn reload_publishes_a_fresh_generation() {
	let (_dir, config) = webapp();
	let classes = config.classes_path();
	let (context, recorder) = context_with_recorder(config);

	context.start().unwrap();
	let old_boundary = context.boundary().unwrap();
	let before = context.lookup("app.Main").unwrap();

	fs::write(classes.join("app/Main.class"), b"v2").unwrap();
	assert_eq!(context.reload().unwrap(), Generation::new(2));

	let after = context.lookup("app.Main").unwrap();
	assert_eq!(after.bytes(), b"v2");
	assert!(!Arc::ptr_eq(&before, &after));
	assert!(old_boundary.is_retired());
	assert_eq!(context.generation(), Some(Generation::new(2)));
	assert_eq!(recorder.starts.load(Ordering::SeqCst), 2);
	assert_eq!(recorder.stops.load(Ordering::SeqCst), 1);
}

#[test]
fn startup_failure_is_recoverable_by_retrying() {
	let (_dir, config) = webapp();
	let (context, recorder) = context_with_recorder(config);
	recorder.fail_start.store(true, Ordering::SeqCst);

	let err = context.start().unwrap_err();
	assert!(matches!(err, LifecycleError::Startup { generation, .. } if generation == Generation::FIRST));
	assert_eq!(context.state(), ContextState::Failed);
	assert!(context.boundary().is_none());
	assert!(context.lookup("app.Main").is_none());

	recorder.fail_start.store(false, Ordering::SeqCst);
	assert_eq!(context.start().unwrap(), Generation::new(2));
	assert_eq!(context.state(), ContextState::Running);
}

#[test]
fn teardown_failure_unpublishes_the_boundary() {
	let (_dir, config) = webapp();
	let (context, recorder) = context_with_recorder(config);
	context.start().unwrap();
	recorder.fail_stop.store(true, Ordering::SeqCst);

	assert!(matches!(
		context.reload(),
		Err(LifecycleError::Teardown { .. })
	));
	assert_eq!(context.state(), ContextState::Failed);
	assert!(context.boundary().is_none());
	assert_eq!(recorder.starts.load(Ordering::SeqCst), 1);

	recorder.fail_stop.store(false, Ordering::SeqCst);
	context.start().unwrap();
	assert_eq!(context.state(), ContextState::Running);
}

#[test]
fn missing_root_fails_the_start() {
	let dir = tempdir().unwrap();
	let context = ReloadableContext::builder(ContextConfig::new(dir.path().join("gone")))
		.build()
		.unwrap();

	assert!(matches!(
		context.start(),
		Err(LifecycleError::Startup { .. })
	));
	assert_eq!(context.state(), ContextState::Failed);
}

#[test]
fn missing_host_entries_are_rejected() {
	let (dir, mut config) = webapp();
	config.host_classpath.push(dir.path().join("no-such.jar"));

	assert!(matches!(
		ReloadableContext::builder(config).build(),
		Err(LifecycleError::HostClasspath { .. })
	));
}

#[test]
fn builtin_host_sources_follow_the_classpath() {
	let (_dir, config) = webapp();
	let context = ReloadableContext::builder(config)
		.host_source(MemorySource::new("builtins").with("version.txt", b"1.0".as_slice()))
		.build()
		.unwrap();

	assert_eq!(context.host().len(), 1);
	assert_eq!(
		context.host().find("version.txt").unwrap().bytes(),
		b"1.0"
	);
}

#[test]
fn info_reports_the_published_generation() {
	let (_dir, mut config) = webapp();
	config.bind_address = Some("127.0.0.1".into());
	config.port = 8080;
	let context = ReloadableContext::builder(config.clone()).build().unwrap();
	context.start().unwrap();

	let info = context.info();
	assert_eq!(info.bind_address.as_deref(), Some("127.0.0.1"));
	assert_eq!(info.port, 8080);
	assert_eq!(info.root, config.root);
	assert_eq!(info.context_path, "/");
	assert_eq!(info.state, ContextState::Running);
	assert_eq!(info.generation, Some(Generation::FIRST));
}

static MAIN: ModuleDescriptor = ModuleDescriptor {
	id: "app.Main",
	summary: "Application entry point",
};

struct Main(usize);

impl Module for Main {
	fn descriptor(&self) -> &'static ModuleDescriptor {
		&MAIN
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

struct MainFactory;

impl ModuleFactory for MainFactory {
	fn descriptor(&self) -> &'static ModuleDescriptor {
		&MAIN
	}

	fn build(&self, artifact: &Artifact) -> anyhow::Result<Box<dyn Module>> {
		Ok(Box::new(Main(artifact.len())))
	}
}

#[test]
fn startup_modules_are_defined_per_generation() {
	let (_dir, mut config) = webapp();
	config.startup_modules.push("app.Main".into());
	let mut registry = ModuleRegistry::new();
	registry.register(MainFactory).unwrap();
	let context = ReloadableContext::builder(config)
		.modules(registry)
		.build()
		.unwrap();

	context.start().unwrap();
	let name = ResourceName::class("app.Main").unwrap();
	let first = context.define(&name).unwrap();
	assert_eq!(first.downcast_ref::<Main>().unwrap().0, 2);

	context.reload().unwrap();
	let second = context.define(&name).unwrap();
	assert_eq!(second.generation(), Generation::new(2));
	assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn unregistered_startup_modules_fail_the_start() {
	let (_dir, mut config) = webapp();
	config.startup_modules.push("app.Main".into());
	let context = ReloadableContext::builder(config).build().unwrap();

	assert!(matches!(
		context.start(),
		Err(LifecycleError::Startup { .. })
	));
	assert_eq!(context.state(), ContextState::Failed);
}
