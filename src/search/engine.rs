use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::aggregator::ResultAggregator;
use super::record::MatchRecord;
use super::request::SearchRequest;
use super::scheduler::{Traversal, TraversalStats};
use super::tracker::CompletionTracker;
use crate::query::{QueryError, QueryMatcher};

/// Upper bound on workers a single search may start.
pub const DEFAULT_MAX_THREADS: usize = 64;

/// Result of one completed search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
	/// Matches in no particular order, at most the request's `max_results`.
	pub records: Vec<MatchRecord>,
	/// Whether the result cap stopped the traversal early.
	pub capped: bool,
	pub stats: TraversalStats,
	pub elapsed: Duration,
}

/// Runs searches. Holds only immutable configuration, so one engine can
/// serve many concurrent searches from different threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
	max_threads: usize,
}

impl Default for SearchEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl SearchEngine {
	pub fn new() -> Self {
		Self {
			max_threads: DEFAULT_MAX_THREADS,
		}
	}

	/// Clamp every search to at most `max_threads` workers.
	pub fn with_max_threads(mut self, max_threads: usize) -> Self {
		self.max_threads = max_threads.max(1);
		self
	}

	pub fn max_threads(&self) -> usize {
		self.max_threads
	}

	/// Search the request's roots for entries matching its query and filters.
	///
	/// The query is compiled before any directory is opened, so an invalid
	/// pattern fails without touching the filesystem. Every other problem
	/// (missing roots, unreadable directories, vanished entries) is absorbed
	/// and reflected only in the returned [`TraversalStats`].
	pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, QueryError> {
		let started = Instant::now();
		let matcher = QueryMatcher::compile(&request.query, request.use_regex, request.case_sensitive)?;
		let filters = request.filters();

		let roots = request
			.roots
			.iter()
			.filter(|root| {
				let exists = root.exists();
				if !exists {
					warn!(root = %root.display(), "search root does not exist; skipping");
				}
				exists
			})
			.cloned()
			.collect::<Vec<PathBuf>>();

		let workers = request.thread_count().min(self.max_threads);
		info!(
			query = %request.query,
			roots = roots.len(),
			workers,
			max_results = request.max_results,
			"starting search"
		);

		let tracker = CompletionTracker::new();
		let aggregator = ResultAggregator::new(request.max_results);
		let mut traversal = Traversal::new(&matcher, &filters, &tracker, &aggregator);
		traversal.include_hidden = request.include_hidden;
		traversal.max_depth = request.max_depth;
		traversal.run(&roots, workers);

		let stats = traversal.stats();
		let capped = aggregator.is_capped() && request.max_results > 0;
		let records = aggregator.into_records();
		let elapsed = started.elapsed();
		info!(
			matches = records.len(),
			capped,
			directories = stats.directories_scanned,
			errors = stats.access_errors,
			elapsed_ms = elapsed.as_millis() as u64,
			"search finished"
		);

		Ok(SearchOutcome {
			records,
			capped,
			stats,
			elapsed,
		})
	}
}

#[cfg(test)]
mod tests {
	use std::fs::{self, File};

	use tempfile::TempDir;

	use super::*;

	#[test]
	fn invalid_query_fails_before_traversal() {
		let engine = SearchEngine::new();
		let request = SearchRequest::new("file(", ["/definitely/not/here"]).with_regex(true);
		assert!(engine.search(&request).is_err());
	}

	#[test]
	fn missing_roots_are_skipped() {
		let dir = TempDir::new().unwrap();
		File::create(dir.path().join("keep.txt")).unwrap();
		let request = SearchRequest::new("*.txt", [dir.path().join("missing"), dir.path().to_path_buf()]);

		let outcome = SearchEngine::new().search(&request).unwrap();

		assert_eq!(outcome.records.len(), 1);
		assert_eq!(outcome.stats.access_errors, 0);
	}

	#[test]
	fn zero_max_results_returns_nothing() {
		let dir = TempDir::new().unwrap();
		File::create(dir.path().join("a.txt")).unwrap();
		let request = SearchRequest::new("*", [dir.path()]).with_max_results(0);

		let outcome = SearchEngine::new().search(&request).unwrap();

		assert!(outcome.records.is_empty());
		assert!(!outcome.capped);
	}

	#[test]
	fn thread_count_is_clamped() {
		let dir = TempDir::new().unwrap();
		fs::create_dir(dir.path().join("sub")).unwrap();
		File::create(dir.path().join("sub/a.txt")).unwrap();
		let engine = SearchEngine::new().with_max_threads(1);
		let request = SearchRequest::new("*.txt", [dir.path()]).with_threads(16);

		let outcome = engine.search(&request).unwrap();

		assert_eq!(engine.max_threads(), 1);
		assert_eq!(outcome.records.len(), 1);
	}
}
