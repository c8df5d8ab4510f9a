use std::collections::HashSet;
use std::path::Path;
use std::time::SystemTime;

/// Inclusive byte-size bounds; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeRange {
	pub min: Option<u64>,
	pub max: Option<u64>,
}

impl SizeRange {
	pub fn new(min: Option<u64>, max: Option<u64>) -> Self {
		Self { min, max }
	}

	pub fn contains(&self, size: u64) -> bool {
		self.min.is_none_or(|min| size >= min) && self.max.is_none_or(|max| size <= max)
	}

	pub fn is_unbounded(&self) -> bool {
		self.min.is_none() && self.max.is_none()
	}
}

/// Inclusive modification-time bounds; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
	pub from: Option<SystemTime>,
	pub to: Option<SystemTime>,
}

impl TimeRange {
	pub fn new(from: Option<SystemTime>, to: Option<SystemTime>) -> Self {
		Self { from, to }
	}

	pub fn contains(&self, time: SystemTime) -> bool {
		self.from.is_none_or(|from| time >= from) && self.to.is_none_or(|to| time <= to)
	}

	pub fn is_unbounded(&self) -> bool {
		self.from.is_none() && self.to.is_none()
	}
}

/// Post-match filters applied to a candidate entry.
///
/// The extension allow-list is checked against the entry's own name, so a
/// directory called `archive.zip` passes a `zip` filter while `docs` does not.
/// The size range only ever rejects files.
#[derive(Debug, Clone, Default)]
pub struct EntryFilters {
	extensions: Option<HashSet<String>>,
	size: Option<SizeRange>,
	modified: Option<TimeRange>,
}

impl EntryFilters {
	pub fn new() -> Self {
		Self::default()
	}

	/// Restrict files to the given extensions. Entries are normalised, and an
	/// empty list leaves files unrestricted.
	pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let set = extensions
			.into_iter()
			.map(|ext| normalize_extension(ext.as_ref()))
			.filter(|ext| !ext.is_empty())
			.collect::<HashSet<_>>();
		self.extensions = (!set.is_empty()).then_some(set);
		self
	}

	pub fn with_size(mut self, range: SizeRange) -> Self {
		self.size = (!range.is_unbounded()).then_some(range);
		self
	}

	pub fn with_modified(mut self, range: TimeRange) -> Self {
		self.modified = (!range.is_unbounded()).then_some(range);
		self
	}

	pub fn extensions(&self) -> Option<&HashSet<String>> {
		self.extensions.as_ref()
	}

	pub fn size(&self) -> Option<SizeRange> {
		self.size
	}

	pub fn modified(&self) -> Option<TimeRange> {
		self.modified
	}

	/// Whether a name-matched entry survives every configured filter.
	///
	/// The extension allow-list is not limited to files. Directories are
	/// checked against it by their own name, so a `doc`-only search reports
	/// no plain folders while a folder called `archive.zip` still passes a
	/// `zip` filter. Descent is unaffected either way. Only the size range
	/// skips directories; the modification-time range applies to every entry.
	pub fn accepts(&self, name: &str, is_dir: bool, size: u64, modified: SystemTime) -> bool {
		if let Some(allowed) = &self.extensions
			&& !allowed.contains(&extension_of(name))
		{
			return false;
		}
		if !is_dir
			&& let Some(range) = self.size
			&& !range.contains(size)
		{
			return false;
		}

		self.modified.is_none_or(|range| range.contains(modified))
	}
}

/// Normalize an extension by trimming and removing leading dots.
pub fn normalize_extension(ext: &str) -> String {
	ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Lowercase extension of a file name, empty when there is none.
///
/// A leading dot does not start an extension, so `.bashrc` has none.
pub fn extension_of(name: &str) -> String {
	Path::new(name)
		.extension()
		.map(|ext| ext.to_string_lossy().to_lowercase())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;

	fn at(secs: u64) -> SystemTime {
		SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
	}

	#[test]
	fn extension_filter_checks_entry_names() {
		let filters = EntryFilters::new().with_extensions(["zip"]);
		assert!(filters.accepts("bundle.zip", false, 10, at(0)));
		assert!(filters.accepts("archive.zip", true, 0, at(0)));
		assert!(!filters.accepts("notes.txt", false, 10, at(0)));
		assert!(!filters.accepts("subfolder", true, 0, at(0)));
	}

	#[test]
	fn extensions_are_normalized() {
		let filters = EntryFilters::new().with_extensions([" .DOC ", ""]);
		assert!(filters.accepts("file2.doc", false, 0, at(0)));
		assert!(filters.accepts("REPORT.Doc", false, 0, at(0)));
	}

	#[test]
	fn empty_extension_list_means_no_restriction() {
		let filters = EntryFilters::new().with_extensions(Vec::<String>::new());
		assert!(filters.extensions().is_none());
		assert!(filters.accepts("anything.bin", false, 0, at(0)));
	}

	#[test]
	fn size_bounds_are_inclusive_and_files_only() {
		let filters = EntryFilters::new().with_size(SizeRange::new(Some(10), Some(20)));
		assert!(filters.accepts("a", false, 10, at(0)));
		assert!(filters.accepts("a", false, 20, at(0)));
		assert!(!filters.accepts("a", false, 9, at(0)));
		assert!(!filters.accepts("a", false, 21, at(0)));
		assert!(filters.accepts("dir", true, 0, at(0)));
	}

	#[test]
	fn open_size_bound() {
		let filters = EntryFilters::new().with_size(SizeRange::new(None, Some(5)));
		assert!(filters.accepts("a", false, 0, at(0)));
		assert!(!filters.accepts("a", false, 6, at(0)));
	}

	#[test]
	fn time_range_applies_to_directories_too() {
		let filters = EntryFilters::new().with_modified(TimeRange::new(Some(at(100)), Some(at(200))));
		assert!(filters.accepts("dir", true, 0, at(100)));
		assert!(filters.accepts("dir", true, 0, at(200)));
		assert!(!filters.accepts("dir", true, 0, at(99)));
		assert!(!filters.accepts("file", false, 0, at(201)));
	}

	#[test]
	fn unbounded_ranges_are_dropped() {
		let filters = EntryFilters::new()
			.with_size(SizeRange::default())
			.with_modified(TimeRange::default());
		assert!(filters.size().is_none());
		assert!(filters.modified().is_none());
	}

	#[test]
	fn extension_of_handles_edge_cases() {
		assert_eq!(extension_of("archive.tar.GZ"), "gz");
		assert_eq!(extension_of(".bashrc"), "");
		assert_eq!(extension_of("Makefile"), "");
	}
}
