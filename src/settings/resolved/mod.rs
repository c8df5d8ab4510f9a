use std::path::PathBuf;
use std::time::Duration;

use scour::{IndexOptions, SearchDefaults};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub search: SearchSettings,
	pub cache: CacheSettings,
}

/// Effective `[search]` settings.
#[derive(Debug, Clone)]
pub struct SearchSettings {
	pub max_results: usize,
	pub threads: Option<usize>,
	pub default_paths: Vec<PathBuf>,
	pub include_hidden: bool,
	pub max_depth: Option<usize>,
}

/// Effective `[cache]` settings.
#[derive(Debug, Clone)]
pub struct CacheSettings {
	pub ttl: Duration,
	pub persist: bool,
	pub dir: Option<PathBuf>,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Values used to complete search requests.
	pub fn search_defaults(&self) -> SearchDefaults {
		SearchDefaults {
			paths: self.search.default_paths.clone(),
			max_results: self.search.max_results,
			threads: self.search.threads,
			include_hidden: self.search.include_hidden,
			max_depth: self.search.max_depth,
		}
	}

	/// Options for constructing the directory index cache.
	pub fn index_options(&self) -> IndexOptions {
		IndexOptions {
			ttl: self.cache.ttl,
			persist: self.cache.persist,
			cache_dir: self.cache.dir.clone(),
		}
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}

#[cfg(test)]
pub(crate) fn sample_config() -> ResolvedConfig {
	ResolvedConfig {
		search: SearchSettings {
			max_results: 500,
			threads: None,
			default_paths: vec![PathBuf::from("/tmp")],
			include_hidden: false,
			max_depth: None,
		},
		cache: CacheSettings {
			ttl: Duration::from_secs(600),
			persist: true,
			dir: None,
		},
	}
}
