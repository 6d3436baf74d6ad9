use std::path::PathBuf;

use clap::Parser;
use tempfile::tempdir;

use super::*;

#[test]
fn cli_overrides_take_precedence() {
    let cli = CliArgs::parse_from([
        "strata",
        "--root",
        "/srv/app",
        "--context-path",
        "/shop",
        "--bind",
        "127.0.0.1",
        "--port",
        "8080",
        "--classpath",
        "/libs/helpers.jar",
        "--system-prefix",
        "pkg.internal.",
        "--isolated-prefix",
        "app.",
        "--startup-module",
        "app.Main",
        "--no-warn-host-fallback",
        "--log-filter",
        "debug",
        "app.Main",
    ]);

    let mut config = RawConfig::default();
    config.server.port = Some(9000);
    config.rules.system = Some(vec!["org.".into()]);
    config.apply_cli_overrides(&cli);

    assert_eq!(config.webapp.root, Some(PathBuf::from("/srv/app")));
    assert_eq!(config.webapp.context_path.as_deref(), Some("/shop"));
    assert_eq!(config.server.bind_address.as_deref(), Some("127.0.0.1"));
    assert_eq!(config.server.port, Some(8080));
    assert_eq!(
        config.host.classpath,
        Some(vec![PathBuf::from("/libs/helpers.jar")])
    );
    assert_eq!(config.rules.system, Some(vec!["pkg.internal.".to_string()]));
    assert_eq!(config.rules.isolated, Some(vec!["app.".to_string()]));
    assert_eq!(config.modules.startup, Some(vec!["app.Main".to_string()]));
    assert_eq!(config.logging.suppress_host_fallback_warnings, Some(true));
    assert_eq!(config.logging.filter.as_deref(), Some("debug"));
}

#[test]
fn absent_flags_keep_file_values() {
    let cli = CliArgs::parse_from(["strata", "app.Main"]);
    let mut config = RawConfig::default();
    config.server.port = Some(9000);
    config.logging.suppress_host_fallback_warnings = Some(false);
    config.apply_cli_overrides(&cli);

    assert_eq!(config.server.port, Some(9000));
    assert_eq!(config.logging.suppress_host_fallback_warnings, Some(false));
}

#[test]
fn resolve_fills_defaults() {
    let dir = tempdir().unwrap();
    let cli = CliArgs::parse_from(["strata", "app.Main"]);
    let mut config = RawConfig::default();
    config.webapp.root = Some(dir.path().to_path_buf());
    config.rules.system = Some(vec![" pkg.internal. ".into(), "".into()]);

    let resolved = config.resolve(&cli).unwrap();
    assert_eq!(resolved.root, dir.path().canonicalize().unwrap());
    assert_eq!(resolved.context_path, "/");
    assert_eq!(resolved.classes_dir, PathBuf::from("WEB-INF/classes"));
    assert_eq!(resolved.lib_dir, PathBuf::from("WEB-INF/lib"));
    assert_eq!(resolved.port, 0);
    assert_eq!(resolved.system_rules, vec!["pkg.internal."]);
    assert!(resolved.warn_on_host_fallback);
    assert_eq!(resolved.log_filter, "info");
}

#[test]
fn resolve_reports_the_origin_of_bad_values() {
    let dir = tempdir().unwrap();
    let cli = CliArgs::parse_from(["strata", "--port", "70000", "app.Main"]);
    let mut config = RawConfig::default();
    config.webapp.root = Some(dir.path().to_path_buf());
    config.apply_cli_overrides(&cli);

    let message = config.resolve(&cli).unwrap_err().to_string();
    assert!(message.contains("server.port"));
    assert!(message.contains("CLI flag `--port`"));
    assert!(message.contains("value: 70000"));
}

#[test]
fn missing_roots_are_rejected() {
    let dir = tempdir().unwrap();
    let cli = CliArgs::parse_from(["strata", "app.Main"]);
    let mut config = RawConfig::default();
    config.webapp.root = Some(dir.path().join("missing"));

    assert!(config.resolve(&cli).is_err());
}
