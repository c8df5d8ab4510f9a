use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod cache;
mod search;

use cache::CacheSection;
use search::SearchSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	cache: CacheSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let search_args = cli.search_args();
		let sources = ConfigSources {
			search_threads: detect_source(
				search_args.is_some_and(|args| args.threads.is_some()),
				self.search.threads.is_some(),
				"SCOUR__SEARCH__THREADS",
				"--threads",
				"search.threads",
			),
			search_max_results: detect_source(
				search_args.is_some_and(|args| args.max_results.is_some()),
				self.search.max_results.is_some(),
				"SCOUR__SEARCH__MAX_RESULTS",
				"--max-results",
				"search.max_results",
			),
			cache_ttl: detect_source(
				false,
				self.cache.ttl_secs.is_some(),
				"SCOUR__CACHE__TTL_SECS",
				"",
				"cache.ttl_secs",
			),
		};

		let config = ResolvedConfig {
			search: self.search.resolve(),
			cache: self.cache.resolve(),
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
