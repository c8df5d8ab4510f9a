use std::borrow::Cow;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

/// One descendant captured in a directory snapshot.
///
/// Names and paths keep the bytes reported by the filesystem, so entries
/// whose names are not valid UTF-8 still point at real files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDescriptor {
	#[serde(with = "os_text")]
	pub name: OsString,
	/// Directory containing the entry.
	#[serde(with = "os_text")]
	pub parent: PathBuf,
	#[serde(with = "os_text")]
	pub full_path: PathBuf,
	/// Size in bytes; zero for directories.
	pub size: u64,
	#[serde(with = "epoch_time")]
	pub modified: SystemTime,
	pub is_dir: bool,
}

impl EntryDescriptor {
	/// Name for display, with invalid UTF-8 replaced.
	pub fn name_lossy(&self) -> Cow<'_, str> {
		self.name.to_string_lossy()
	}
}

/// Flat listing of every non-hidden descendant of a directory at a point in
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
	#[serde(with = "os_text")]
	pub directory: PathBuf,
	#[serde(with = "epoch_time")]
	pub captured_at: SystemTime,
	pub entries: Vec<EntryDescriptor>,
}

impl IndexSnapshot {
	pub fn new(directory: impl Into<PathBuf>, entries: Vec<EntryDescriptor>) -> Self {
		Self {
			directory: directory.into(),
			captured_at: SystemTime::now(),
			entries,
		}
	}

	pub fn directory(&self) -> &Path {
		&self.directory
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Age of the snapshot, or `None` when it was captured in the future.
	pub fn age(&self) -> Option<Duration> {
		SystemTime::now().duration_since(self.captured_at).ok()
	}

	/// Whether the snapshot is younger than `ttl`.
	///
	/// A capture time ahead of the clock counts as stale so that a skewed
	/// snapshot is rebuilt rather than trusted forever.
	pub fn is_fresh(&self, ttl: Duration) -> bool {
		self.age().is_some_and(|age| age < ttl)
	}
}

/// Stores OS strings as plain JSON strings when they are valid UTF-8 and as
/// the platform's raw representation otherwise.
mod os_text {
	use std::ffi::{OsStr, OsString};

	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Stored {
		Text(String),
		Raw(OsString),
	}

	pub(super) fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
	where
		T: AsRef<OsStr>,
		S: Serializer,
	{
		let value = value.as_ref();
		match value.to_str() {
			Some(text) => serializer.serialize_str(text),
			None => value.serialize(serializer),
		}
	}

	pub(super) fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
	where
		T: From<OsString>,
		D: Deserializer<'de>,
	{
		Ok(match Stored::deserialize(deserializer)? {
			Stored::Text(text) => OsString::from(text),
			Stored::Raw(raw) => raw,
		}
		.into())
	}
}

/// Stores a timestamp as signed whole seconds plus nanoseconds relative to
/// the Unix epoch, so modification times before 1970 survive a round trip.
mod epoch_time {
	use std::time::{Duration, SystemTime, UNIX_EPOCH};

	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	const NANOS_PER_SEC: u32 = 1_000_000_000;

	pub(super) fn serialize<S: Serializer>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
		to_parts(*time).serialize(serializer)
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SystemTime, D::Error> {
		let (secs, nanos) = <(i64, u32)>::deserialize(deserializer)?;
		if nanos >= NANOS_PER_SEC {
			return Err(serde::de::Error::custom(format!("nanoseconds out of range: {nanos}")));
		}
		from_parts(secs, nanos)
			.ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {secs}s")))
	}

	/// `nanos` is always added, so `-0.5s` becomes `(-1, 500_000_000)`.
	pub(super) fn to_parts(time: SystemTime) -> (i64, u32) {
		match time.duration_since(UNIX_EPOCH) {
			Ok(after) => (after.as_secs() as i64, after.subsec_nanos()),
			Err(err) => {
				let before = err.duration();
				let secs = -(before.as_secs() as i64);
				match before.subsec_nanos() {
					0 => (secs, 0),
					nanos => (secs - 1, NANOS_PER_SEC - nanos),
				}
			}
		}
	}

	pub(super) fn from_parts(secs: i64, nanos: u32) -> Option<SystemTime> {
		let base = if secs >= 0 {
			UNIX_EPOCH.checked_add(Duration::from_secs(secs as u64))?
		} else {
			UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))?
		};
		base.checked_add(Duration::from_nanos(u64::from(nanos)))
	}
}
