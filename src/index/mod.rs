//! TTL snapshots of directory listings.
//!
//! [`IndexCache::get`] answers "what lies beneath this directory" from
//! memory, then from disk, and only rescans when neither copy is fresh. The
//! cache is independent of live search; nothing in [`crate::search`] reads it.

mod build;
mod snapshot;
mod store;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

pub use snapshot::{EntryDescriptor, IndexSnapshot};
pub use store::CacheIoError;

use crate::app_dirs;
use store::SnapshotStore;

/// Snapshot lifetime used when none is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Construction options for an [`IndexCache`].
#[derive(Debug, Clone)]
pub struct IndexOptions {
	/// Snapshots at least this old are rebuilt on the next lookup.
	pub ttl: Duration,
	/// Mirror snapshots to disk so they survive restarts.
	pub persist: bool,
	/// Base cache directory; the platform cache directory when unset.
	pub cache_dir: Option<PathBuf>,
}

impl Default for IndexOptions {
	fn default() -> Self {
		Self {
			ttl: DEFAULT_TTL,
			persist: true,
			cache_dir: None,
		}
	}
}

/// Lookup counters, useful when tuning the TTL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
	pub memory_hits: u64,
	pub disk_hits: u64,
	pub rebuilds: u64,
}

#[derive(Default)]
struct CacheState {
	snapshots: HashMap<PathBuf, Arc<IndexSnapshot>>,
	stats: CacheStats,
}

/// Per-directory snapshot cache with lazy expiry.
///
/// Directories are keyed by the path exactly as given; callers wanting
/// `./a` and `a` to share an entry should canonicalize first. Lookups,
/// rebuilds and stores for one cache instance are serialized behind a single
/// lock, so concurrent `get` calls never scan the same directory twice.
pub struct IndexCache {
	ttl: Duration,
	store: Option<SnapshotStore>,
	state: Mutex<CacheState>,
}

impl IndexCache {
	pub fn new(options: IndexOptions) -> Self {
		let store = if options.persist {
			let base = match options.cache_dir {
				Some(dir) => Some(dir),
				None => match app_dirs::get_cache_dir() {
					Ok(dir) => Some(dir),
					Err(err) => {
						warn!(error = %err, "no cache directory available; index kept in memory only");
						None
					}
				},
			};
			base.map(|dir| SnapshotStore::new(&dir))
		} else {
			None
		};

		Self {
			ttl: options.ttl,
			store,
			state: Mutex::new(CacheState::default()),
		}
	}

	/// A cache that never touches the disk.
	pub fn in_memory(ttl: Duration) -> Self {
		Self::new(IndexOptions {
			ttl,
			persist: false,
			cache_dir: None,
		})
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	pub fn is_persistent(&self) -> bool {
		self.store.is_some()
	}

	/// Return a fresh snapshot of `directory`, rebuilding it if needed.
	pub fn get(&self, directory: &Path) -> Arc<IndexSnapshot> {
		let mut guard = self.state.lock();
		let state = &mut *guard;

		if let Some(snapshot) = state.snapshots.get(directory)
			&& snapshot.is_fresh(self.ttl)
		{
			state.stats.memory_hits += 1;
			return Arc::clone(snapshot);
		}

		if let Some(snapshot) = self.load_durable(directory) {
			let snapshot = Arc::new(snapshot);
			state
				.snapshots
				.insert(directory.to_path_buf(), Arc::clone(&snapshot));
			state.stats.disk_hits += 1;
			return snapshot;
		}

		let snapshot = Arc::new(build::scan(directory));
		state
			.snapshots
			.insert(directory.to_path_buf(), Arc::clone(&snapshot));
		state.stats.rebuilds += 1;
		self.save_durable(&snapshot);
		snapshot
	}

	/// Drop both copies of the snapshot for `directory`. Never fails.
	pub fn invalidate(&self, directory: &Path) {
		let mut state = self.state.lock();
		state.snapshots.remove(directory);
		if let Some(store) = &self.store
			&& let Err(err) = store.remove(directory)
		{
			warn!(error = %err, "failed to remove index snapshot");
		}
		debug!(directory = %directory.display(), "invalidated index snapshot");
	}

	pub fn stats(&self) -> CacheStats {
		self.state.lock().stats
	}

	/// Number of snapshots held in memory, fresh or not.
	pub fn len(&self) -> usize {
		self.state.lock().snapshots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn load_durable(&self, directory: &Path) -> Option<IndexSnapshot> {
		let store = self.store.as_ref()?;
		match store.load(directory) {
			Ok(Some(snapshot)) if snapshot.is_fresh(self.ttl) => Some(snapshot),
			Ok(Some(_)) => {
				debug!(directory = %directory.display(), "stored index snapshot expired");
				None
			}
			Ok(None) => None,
			Err(err) => {
				debug!(error = %err, "ignoring unreadable index snapshot");
				None
			}
		}
	}

	fn save_durable(&self, snapshot: &IndexSnapshot) {
		if let Some(store) = &self.store
			&& let Err(err) = store.save(snapshot)
		{
			warn!(error = %err, "failed to persist index snapshot");
		}
	}
}
