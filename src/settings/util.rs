use std::env;
use std::path::PathBuf;

use scour::app_dirs;

/// Paths searched when neither the request nor the configuration names any.
///
/// The home directory, or the working directory when no home can be found.
pub(super) fn fallback_search_paths() -> Vec<PathBuf> {
	app_dirs::get_home_dir()
		.ok()
		.or_else(|| env::current_dir().ok())
		.into_iter()
		.collect()
}

/// Drop empty entries from a configured path list.
pub(super) fn sanitize_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
	paths
		.into_iter()
		.filter(|path| !path.as_os_str().is_empty())
		.collect()
}
