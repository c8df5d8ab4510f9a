use std::path::PathBuf;

use serde::Deserialize;

use scour::search::DEFAULT_MAX_RESULTS;

use crate::cli::CliArgs;

use super::super::resolved::SearchSettings;
use super::super::util::{fallback_search_paths, sanitize_paths};

/// `[search]` options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) max_results: Option<usize>,
	pub(super) threads: Option<usize>,
	pub(super) default_paths: Option<Vec<PathBuf>>,
	pub(super) include_hidden: Option<bool>,
	pub(super) max_depth: Option<usize>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		let Some(args) = cli.search_args() else {
			return;
		};
		if let Some(value) = args.max_results {
			self.max_results = Some(value);
		}
		if let Some(value) = args.threads {
			self.threads = Some(value);
		}
		if args.hidden {
			self.include_hidden = Some(true);
		}
		if let Some(value) = args.max_depth {
			self.max_depth = Some(value);
		}
	}

	pub(super) fn resolve(self) -> SearchSettings {
		let default_paths = self
			.default_paths
			.map(sanitize_paths)
			.filter(|paths| !paths.is_empty())
			.unwrap_or_else(fallback_search_paths);

		SearchSettings {
			max_results: self.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
			threads: self.threads,
			default_paths,
			include_hidden: self.include_hidden.unwrap_or(false),
			max_depth: self.max_depth,
		}
	}
}
