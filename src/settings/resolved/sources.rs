use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) search_threads: Option<SettingSource>,
	pub(crate) search_max_results: Option<SettingSource>,
	pub(crate) cache_ttl: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_threads(&self) -> SettingSource {
		self.search_threads
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.threads"))
	}

	pub(crate) fn source_for_max_results(&self) -> SettingSource {
		self.search_max_results
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.max_results"))
	}

	pub(crate) fn source_for_ttl(&self) -> SettingSource {
		self.cache_ttl
			.clone()
			.unwrap_or(SettingSource::ConfigKey("cache.ttl_secs"))
	}
}
