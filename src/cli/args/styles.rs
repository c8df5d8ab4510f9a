use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use scour::{app_dirs, logging};

/// Version banner listing where `scour` reads configuration and keeps its
/// index snapshots, plus the variables that relocate them.
pub(super) fn long_version() -> &'static str {
	let config_dir = describe(app_dirs::get_config_dir());
	let index_dir = describe(app_dirs::get_cache_dir().map(|dir| dir.join("index")));

	let mut details = format!("scour {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir} (SCOUR_CONFIG_DIR)");
	let _ = writeln!(details, "index snapshots: {index_dir} (SCOUR_CACHE_DIR)");
	let _ = writeln!(details, "log filter: {}", logging::LOG_ENV);

	Box::leak(details.into_boxed_str())
}

fn describe(dir: Result<PathBuf>) -> String {
	match dir {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	}
}

/// Help colours: section headers and usage in bold blue, flags in cyan,
/// value placeholders dimmed, errors in bold red.
pub(super) fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Blue.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Blue.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::White.on_default().effects(Effects::DIMMED))
		.error(AnsiColor::Red.on_default().effects(Effects::BOLD))
}
