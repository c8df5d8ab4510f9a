use anyhow::{Context, Result};
use tracing::debug;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::build_config;
use crate::cli::CliArgs;

/// Resolve the effective `scour` configuration.
///
/// Layers are merged lowest first: built-in defaults, the default config
/// files (unless `--no-config`), every `--config FILE`, `SCOUR__*`
/// environment variables, and finally the flags of the `search` subcommand.
/// The merged values are validated before they are returned.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let mut raw = read_layers(cli)?;
	raw.apply_cli_overrides(cli);
	let resolved = raw.resolve(cli)?;

	debug!(
		max_results = resolved.search.max_results,
		threads = ?resolved.search.threads,
		default_paths = resolved.search.default_paths.len(),
		cache_ttl_secs = resolved.cache.ttl.as_secs(),
		persist_index = resolved.cache.persist,
		"configuration resolved"
	);
	Ok(resolved)
}

fn read_layers(cli: &CliArgs) -> Result<RawConfig> {
	let merged = build_config(cli).context("failed to read scour configuration sources")?;
	merged
		.try_deserialize()
		.context("scour configuration has an unexpected shape")
}
