use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use scour::index::DEFAULT_TTL;

use super::super::resolved::CacheSettings;

/// `[cache]` options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct CacheSection {
	pub(super) ttl_secs: Option<u64>,
	pub(super) persist: Option<bool>,
	pub(super) dir: Option<PathBuf>,
}

impl CacheSection {
	pub(super) fn resolve(self) -> CacheSettings {
		CacheSettings {
			ttl: self.ttl_secs.map_or(DEFAULT_TTL, Duration::from_secs),
			persist: self.persist.unwrap_or(true),
			dir: self.dir.filter(|dir| !dir.as_os_str().is_empty()),
		}
	}
}
