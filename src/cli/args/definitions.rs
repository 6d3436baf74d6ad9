use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `strata` binary.
#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    long_version = long_version(),
    about = "Resolve names through an isolated, reloadable web app classpath",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        value_name = "NAME",
        required_unless_present = "print_config",
        help = "Class names (a.b.C) or resource paths (a/b/c.txt) to resolve"
    )]
    pub(crate) names: Vec<String>,
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "STRATA_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'r',
        long,
        value_name = "DIR",
        help = "Web app root directory (default: current directory)"
    )]
    pub(crate) root: Option<PathBuf>,
    #[arg(
        long = "context-path",
        value_name = "PATH",
        help = "Context path the web app is mounted at (default: /)"
    )]
    pub(crate) context_path: Option<String>,
    #[arg(
        long = "classes-dir",
        value_name = "DIR",
        help = "Class directory relative to the root (default: WEB-INF/classes)"
    )]
    pub(crate) classes_dir: Option<PathBuf>,
    #[arg(
        long = "lib-dir",
        value_name = "DIR",
        help = "Archive directory relative to the root (default: WEB-INF/lib)"
    )]
    pub(crate) lib_dir: Option<PathBuf>,
    #[arg(
        long = "bind",
        value_name = "ADDR",
        help = "Address the server would bind to (default: all interfaces)"
    )]
    pub(crate) bind: Option<String>,
    #[arg(
        short = 'p',
        long,
        value_name = "PORT",
        help = "Port the server would listen on, 0 picks one (default: 0)"
    )]
    pub(crate) port: Option<u32>,
    #[arg(
        long = "classpath",
        value_name = "PATH",
        action = ArgAction::Append,
        value_delimiter = ',',
        help = "Host classpath directory or archive, searched in order (default: none)"
    )]
    pub(crate) classpath: Option<Vec<PathBuf>>,
    #[arg(
        long = "system-prefix",
        value_name = "RULE",
        action = ArgAction::Append,
        value_delimiter = ',',
        help = "Names only the host may answer; a trailing '.' marks a package"
    )]
    pub(crate) system_prefixes: Option<Vec<String>>,
    #[arg(
        long = "isolated-prefix",
        value_name = "RULE",
        action = ArgAction::Append,
        value_delimiter = ',',
        help = "Names only the web app may answer; a trailing '.' marks a package"
    )]
    pub(crate) isolated_prefixes: Option<Vec<String>>,
    #[arg(
        long = "startup-module",
        value_name = "CLASS",
        action = ArgAction::Append,
        value_delimiter = ',',
        help = "Class defined on every start (default: none)"
    )]
    pub(crate) startup_modules: Option<Vec<String>>,
    #[arg(
        long = "no-warn-host-fallback",
        help = "Log host classpath fallbacks at debug instead of warn level"
    )]
    pub(crate) no_warn_host_fallback: bool,
    #[arg(
        long = "log-filter",
        value_name = "FILTER",
        help = "Log filter used when RUST_LOG is unset (default: info)"
    )]
    pub(crate) log_filter: Option<String>,
    #[arg(long = "print-config", help = "Print the effective configuration")]
    pub(crate) print_config: bool,
    #[arg(
        long,
        help = "Resolve every name, reload the web app, then resolve them again"
    )]
    pub(crate) reload: bool,
    #[arg(
        short = 'o',
        long,
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how results are printed"
    )]
    pub(crate) output: OutputFormat,
}
