use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	println!("  Root: {}", config.root.display());
	println!("  Context path: {}", config.context_path);
	println!("  Classes dir: {}", config.classes_dir.display());
	println!("  Lib dir: {}", config.lib_dir.display());
	println!(
		"  Bind address: {}",
		config.bind_address.as_deref().unwrap_or("(all interfaces)")
	);
	match config.port {
		0 => println!("  Port: auto"),
		port => println!("  Port: {port}"),
	}
	if config.host_classpath.is_empty() {
		println!("  Host classpath: (empty)");
	} else {
		println!("  Host classpath:");
		for entry in &config.host_classpath {
			println!("    {}", entry.display());
		}
	}
	println!("  System rules: {}", list_or_none(&config.system_rules));
	println!("  Isolated rules: {}", list_or_none(&config.isolated_rules));
	println!("  Startup modules: {}", list_or_none(&config.startup_modules));
	println!(
		"  Warn on host fallback: {}",
		bool_to_word(config.warn_on_host_fallback)
	);
	println!("  Log filter: {}", config.log_filter);
}

fn list_or_none(values: &[String]) -> String {
	if values.is_empty() {
		"(none)".to_string()
	} else {
		values.join(", ")
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
