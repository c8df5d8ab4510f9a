use super::{ConfigError, ConfigSources, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if let Some(threads) = config.search.threads
		&& threads == 0
	{
		return Err(ConfigError::invalid(
			"search.threads",
			threads.to_string(),
			sources.source_for_threads(),
			"must be greater than zero",
		));
	}

	if config.search.max_results == 0 {
		return Err(ConfigError::invalid(
			"search.max_results",
			"0",
			sources.source_for_max_results(),
			"must be greater than zero",
		));
	}

	if config.cache.ttl.is_zero() {
		return Err(ConfigError::invalid(
			"cache.ttl_secs",
			"0",
			sources.source_for_ttl(),
			"must be at least 1 second",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::super::{SettingSource, sample_config};
	use super::*;

	#[test]
	fn validation_accepts_defaults() {
		assert!(validate(&sample_config(), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_threads() {
		let mut config = sample_config();
		config.search.threads = Some(0);

		let sources = ConfigSources {
			search_threads: Some(SettingSource::CliFlag("--threads")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "search.threads"));
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_zero_ttl() {
		let mut config = sample_config();
		config.cache.ttl = Duration::ZERO;

		let sources = ConfigSources {
			cache_ttl: Some(SettingSource::Environment("SCOUR__CACHE__TTL_SECS")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "cache.ttl_secs"));
		assert!(err.to_string().contains("environment variable"));
	}
}
