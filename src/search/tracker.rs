use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded};

/// Counts traversal units that are queued or running and fires a one-shot
/// signal when the count drops back to zero.
///
/// Units are registered through [`CompletionTracker::register`], which hands
/// back a [`UnitGuard`]. The guard deregisters when dropped, so a unit that
/// returns early, fails to read its directory, or is discarded from the queue
/// still decrements exactly once. A parent must register all of its children
/// before its own guard is dropped; otherwise the count could touch zero while
/// discovered work is still pending.
#[derive(Debug)]
pub struct CompletionTracker {
	in_flight: AtomicUsize,
	fired: AtomicBool,
	done_tx: Sender<()>,
	done_rx: Receiver<()>,
}

impl CompletionTracker {
	pub fn new() -> Self {
		let (done_tx, done_rx) = bounded(1);
		Self {
			in_flight: AtomicUsize::new(0),
			fired: AtomicBool::new(false),
			done_tx,
			done_rx,
		}
	}

	/// Count one more unit as in flight.
	pub fn register(&self) -> UnitGuard<'_> {
		self.in_flight.fetch_add(1, Ordering::SeqCst);
		UnitGuard { tracker: self }
	}

	/// Number of units registered and not yet released.
	pub fn in_flight(&self) -> usize {
		self.in_flight.load(Ordering::SeqCst)
	}

	/// Whether the completion signal has fired.
	pub fn is_complete(&self) -> bool {
		self.fired.load(Ordering::Acquire)
	}

	/// Receiver that yields a single message once every unit has finished.
	pub fn completion(&self) -> &Receiver<()> {
		&self.done_rx
	}

	/// Block until every registered unit has been released.
	///
	/// Returns immediately when nothing was ever registered.
	pub fn wait(&self) {
		if self.is_complete() || self.in_flight() == 0 {
			return;
		}
		let _ = self.done_rx.recv();
	}

	fn release(&self) {
		let previous = self.in_flight.fetch_sub(1, Ordering::SeqCst);
		debug_assert!(previous > 0, "unit released more often than registered");
		if previous == 1 && !self.fired.swap(true, Ordering::AcqRel) {
			let _ = self.done_tx.try_send(());
		}
	}
}

impl Default for CompletionTracker {
	fn default() -> Self {
		Self::new()
	}
}

/// Registration handle for one traversal unit.
#[derive(Debug)]
#[must_use = "dropping the guard immediately releases the unit"]
pub struct UnitGuard<'a> {
	tracker: &'a CompletionTracker,
}

impl Drop for UnitGuard<'_> {
	fn drop(&mut self) {
		self.tracker.release();
	}
}
