use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::UNIX_EPOCH;

use crossbeam_channel::{Receiver, Sender, select, unbounded};
use tracing::debug;

use super::aggregator::ResultAggregator;
use super::record::MatchRecord;
use super::tracker::{CompletionTracker, UnitGuard};
use crate::query::{EntryFilters, QueryMatcher};

/// Counters gathered while traversing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
	/// Directories whose listing was read.
	pub directories_scanned: usize,
	/// Directories or entries skipped because they could not be read.
	pub access_errors: usize,
}

/// One directory waiting to be listed.
///
/// The guard is taken when the unit is created, so a unit counts as in
/// flight from the moment it is queued until it is processed or discarded.
struct Unit<'t> {
	dir: PathBuf,
	depth: usize,
	_guard: UnitGuard<'t>,
}

/// Shared, read-only state for one search's traversal.
pub(crate) struct Traversal<'t> {
	pub matcher: &'t QueryMatcher,
	pub filters: &'t EntryFilters,
	pub include_hidden: bool,
	pub max_depth: Option<usize>,
	pub tracker: &'t CompletionTracker,
	pub aggregator: &'t ResultAggregator,
	directories_scanned: AtomicUsize,
	access_errors: AtomicUsize,
}

impl<'t> Traversal<'t> {
	pub fn new(
		matcher: &'t QueryMatcher,
		filters: &'t EntryFilters,
		tracker: &'t CompletionTracker,
		aggregator: &'t ResultAggregator,
	) -> Self {
		Self {
			matcher,
			filters,
			include_hidden: false,
			max_depth: None,
			tracker,
			aggregator,
			directories_scanned: AtomicUsize::new(0),
			access_errors: AtomicUsize::new(0),
		}
	}

	pub fn stats(&self) -> TraversalStats {
		TraversalStats {
			directories_scanned: self.directories_scanned.load(Ordering::Relaxed),
			access_errors: self.access_errors.load(Ordering::Relaxed),
		}
	}

	/// Walk every root with a pool of `workers` threads and return once all
	/// discovered work is finished or the aggregator is capped.
	///
	/// Units left in the queue after an early stop are dropped unprocessed,
	/// which releases their registrations.
	pub fn run(&self, roots: &[PathBuf], workers: usize) {
		if roots.is_empty() {
			return;
		}

		let (work_tx, work_rx) = unbounded::<Unit<'t>>();
		let (stop_tx, stop_rx) = unbounded::<()>();

		for root in roots {
			let unit = Unit {
				dir: root.clone(),
				depth: 0,
				_guard: self.tracker.register(),
			};
			let _ = work_tx.send(unit);
		}

		thread::scope(|scope| {
			for idx in 0..workers.max(1) {
				let work_tx = work_tx.clone();
				let work_rx = work_rx.clone();
				let stop_rx = stop_rx.clone();
				scope.spawn(move || {
					self.worker_loop(idx, &work_tx, &work_rx, &stop_rx);
				});
			}

			select! {
				recv(self.tracker.completion()) -> _ => debug!("traversal finished"),
				recv(self.aggregator.cap_signal()) -> _ => debug!("result cap reached"),
			}
			// Disconnecting the stop channel wakes every idle worker.
			drop(stop_tx);
		});
	}

	fn worker_loop(
		&self,
		idx: usize,
		work_tx: &Sender<Unit<'t>>,
		work_rx: &Receiver<Unit<'t>>,
		stop_rx: &Receiver<()>,
	) {
		loop {
			select! {
				recv(stop_rx) -> _ => break,
				recv(work_rx) -> unit => match unit {
					Ok(unit) => self.visit(unit, work_tx),
					Err(_) => break,
				},
			}
		}
		debug!(worker = idx, "worker stopped");
	}

	/// List one directory, record matches, and queue subdirectories.
	fn visit(&self, unit: Unit<'t>, work_tx: &Sender<Unit<'t>>) {
		if self.aggregator.is_capped() {
			return;
		}

		let entries = match fs::read_dir(&unit.dir) {
			Ok(entries) => entries,
			Err(err) => {
				self.access_errors.fetch_add(1, Ordering::Relaxed);
				debug!(dir = %unit.dir.display(), error = %err, "skipping unreadable directory");
				return;
			}
		};
		self.directories_scanned.fetch_add(1, Ordering::Relaxed);

		for entry in entries {
			if self.aggregator.is_capped() {
				break;
			}

			let entry = match entry {
				Ok(entry) => entry,
				Err(err) => {
					self.access_errors.fetch_add(1, Ordering::Relaxed);
					debug!(dir = %unit.dir.display(), error = %err, "skipping unreadable entry");
					continue;
				}
			};

			let file_name = entry.file_name();
			// Matching and filtering see a lossy rendering; the record keeps
			// the raw name so its path still resolves.
			let name = file_name.to_string_lossy();
			if !self.include_hidden && name.starts_with('.') {
				continue;
			}

			// Symlinks report their own type here, so linked directories are
			// neither descended into nor reported as directories.
			let is_dir = match entry.file_type() {
				Ok(file_type) => file_type.is_dir(),
				Err(err) => {
					self.access_errors.fetch_add(1, Ordering::Relaxed);
					debug!(path = %entry.path().display(), error = %err, "skipping entry without type");
					continue;
				}
			};

			if self.matcher.matches(&name) {
				self.consider(&unit, &entry, &name, is_dir);
			}

			if is_dir && self.max_depth.is_none_or(|max| unit.depth < max) {
				let child = Unit {
					dir: entry.path(),
					depth: unit.depth + 1,
					_guard: self.tracker.register(),
				};
				let _ = work_tx.send(child);
			}
		}
	}

	fn consider(&self, unit: &Unit<'t>, entry: &fs::DirEntry, name: &str, is_dir: bool) {
		let metadata = match entry.metadata() {
			Ok(metadata) => metadata,
			Err(err) => {
				self.access_errors.fetch_add(1, Ordering::Relaxed);
				debug!(path = %entry.path().display(), error = %err, "skipping entry without metadata");
				return;
			}
		};

		let size = if is_dir { 0 } else { metadata.len() };
		let modified = metadata.modified().unwrap_or(UNIX_EPOCH);
		if self.filters.accepts(name, is_dir, size, modified) {
			self.aggregator.push(MatchRecord::new(
				unit.dir.clone(),
				entry.file_name(),
				size,
				modified,
				is_dir,
			));
		}
	}
}
