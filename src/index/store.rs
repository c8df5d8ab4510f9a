use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::snapshot::IndexSnapshot;

const INDEX_VERSION: u32 = 2;
const INDEX_NAMESPACE: &str = "index";

/// A snapshot file that could not be read, written, or removed.
#[derive(Debug, Error)]
pub enum CacheIoError {
	#[error("failed to read snapshot {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to decode snapshot {}: {source}", path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("failed to encode snapshot of {}: {source}", directory.display())]
	Encode {
		directory: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("failed to write snapshot {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to remove snapshot {}: {source}", path.display())]
	Remove {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

#[derive(Serialize)]
struct PayloadRef<'a> {
	version: u32,
	snapshot: &'a IndexSnapshot,
}

#[derive(Deserialize)]
struct Payload {
	version: u32,
	snapshot: IndexSnapshot,
}

/// One JSON file per indexed directory under `<cache_dir>/index/`.
#[derive(Debug, Clone)]
pub(crate) struct SnapshotStore {
	base: PathBuf,
}

impl SnapshotStore {
	pub fn new(cache_dir: &Path) -> Self {
		Self {
			base: cache_dir.join(INDEX_NAMESPACE),
		}
	}

	pub fn path_for(&self, directory: &Path) -> PathBuf {
		let fingerprint = fingerprint_for(directory);
		self.base.join(format!("{fingerprint:016x}.json"))
	}

	/// Read the stored snapshot for `directory`.
	///
	/// A missing file, a different format version, or a file written for
	/// another directory (fingerprint collision) is `Ok(None)`.
	pub fn load(&self, directory: &Path) -> Result<Option<IndexSnapshot>, CacheIoError> {
		let path = self.path_for(directory);
		let bytes = match fs::read(&path) {
			Ok(bytes) => bytes,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(source) => return Err(CacheIoError::Read { path, source }),
		};

		let payload: Payload =
			serde_json::from_slice(&bytes).map_err(|source| CacheIoError::Decode {
				path: path.clone(),
				source,
			})?;
		if payload.version != INDEX_VERSION || payload.snapshot.directory != directory {
			return Ok(None);
		}
		Ok(Some(payload.snapshot))
	}

	/// Write the snapshot through a temporary file and move it into place.
	pub fn save(&self, snapshot: &IndexSnapshot) -> Result<(), CacheIoError> {
		let path = self.path_for(&snapshot.directory);
		if let Some(dir) = path.parent() {
			fs::create_dir_all(dir).map_err(|source| CacheIoError::Write {
				path: dir.to_path_buf(),
				source,
			})?;
		}

		let data = serde_json::to_vec(&PayloadRef {
			version: INDEX_VERSION,
			snapshot,
		})
		.map_err(|source| CacheIoError::Encode {
			directory: snapshot.directory.clone(),
			source,
		})?;

		let tmp_path = path.with_extension("tmp");
		{
			let mut file = fs::File::create(&tmp_path).map_err(|source| CacheIoError::Write {
				path: tmp_path.clone(),
				source,
			})?;
			file.write_all(&data).map_err(|source| CacheIoError::Write {
				path: tmp_path.clone(),
				source,
			})?;
			file.sync_all().ok();
		}

		fs::rename(&tmp_path, &path).map_err(|source| CacheIoError::Write { path, source })
	}

	/// Delete the stored snapshot; absent files are not an error.
	pub fn remove(&self, directory: &Path) -> Result<(), CacheIoError> {
		let path = self.path_for(directory);
		match fs::remove_file(&path) {
			Ok(()) => Ok(()),
			Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
			Err(source) => Err(CacheIoError::Remove { path, source }),
		}
	}
}

fn fingerprint_for(directory: &Path) -> u64 {
	let mut hasher = DefaultHasher::new();
	directory.to_string_lossy().hash(&mut hasher);
	INDEX_VERSION.hash(&mut hasher);
	hasher.finish()
}
