use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread;

use crate::query::{EntryFilters, SizeRange, TimeRange};

/// Default number of records a search returns.
pub const DEFAULT_MAX_RESULTS: usize = 500;

pub const QUICK_MAX_RESULTS: usize = 20;
pub const QUICK_THREADS: usize = 2;
pub const QUICK_MAX_DEPTH: usize = 2;

/// Everything needed to run one search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
	/// Wildcard pattern or regular expression matched against entry names.
	pub query: String,
	/// Directories to search. Missing roots are skipped.
	pub roots: Vec<PathBuf>,
	/// Lowercase extensions without the dot; files only.
	pub extensions: Option<Vec<String>>,
	/// Inclusive byte-size bounds; files only.
	pub size: SizeRange,
	/// Inclusive modification-time bounds.
	pub modified: TimeRange,
	/// Interpret `query` as a regular expression.
	pub use_regex: bool,
	/// Match names case sensitively.
	pub case_sensitive: bool,
	/// Visit entries whose name starts with `.`.
	pub include_hidden: bool,
	/// Deepest directory level to expand; roots are level 0.
	pub max_depth: Option<usize>,
	/// Number of records returned at most.
	pub max_results: usize,
	/// Worker count, defaulting to available parallelism.
	pub threads: Option<usize>,
}

impl SearchRequest {
	pub fn new(query: impl Into<String>, roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
		Self {
			query: query.into(),
			roots: roots.into_iter().map(Into::into).collect(),
			extensions: None,
			size: SizeRange::default(),
			modified: TimeRange::default(),
			use_regex: false,
			case_sensitive: false,
			include_hidden: false,
			max_depth: None,
			max_results: DEFAULT_MAX_RESULTS,
			threads: None,
		}
	}

	/// Small, shallow search used for type-ahead suggestions.
	pub fn quick(query: impl Into<String>, root: impl Into<PathBuf>) -> Self {
		Self::new(query, [root.into()])
			.with_max_results(QUICK_MAX_RESULTS)
			.with_threads(QUICK_THREADS)
			.with_max_depth(Some(QUICK_MAX_DEPTH))
	}

	pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.extensions = Some(extensions.into_iter().map(Into::into).collect());
		self
	}

	pub fn with_size(mut self, size: SizeRange) -> Self {
		self.size = size;
		self
	}

	pub fn with_modified(mut self, modified: TimeRange) -> Self {
		self.modified = modified;
		self
	}

	pub fn with_regex(mut self, use_regex: bool) -> Self {
		self.use_regex = use_regex;
		self
	}

	pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
		self.case_sensitive = case_sensitive;
		self
	}

	pub fn with_hidden(mut self, include_hidden: bool) -> Self {
		self.include_hidden = include_hidden;
		self
	}

	pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn with_max_results(mut self, max_results: usize) -> Self {
		self.max_results = max_results;
		self
	}

	pub fn with_threads(mut self, threads: usize) -> Self {
		self.threads = Some(threads);
		self
	}

	/// Post-match filters described by this request.
	pub fn filters(&self) -> EntryFilters {
		let mut filters = EntryFilters::new().with_size(self.size).with_modified(self.modified);
		if let Some(extensions) = &self.extensions {
			filters = filters.with_extensions(extensions);
		}
		filters
	}

	/// Resolve the effective thread count, defaulting to available parallelism.
	pub fn thread_count(&self) -> usize {
		self.threads
			.filter(|threads| *threads > 0)
			.unwrap_or_else(|| thread::available_parallelism().map_or(1, NonZeroUsize::get))
	}
}
