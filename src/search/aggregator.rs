use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

use super::record::MatchRecord;

/// Multi-producer collector of matches with a soft global cap.
///
/// [`push`](Self::push) never rejects a record. After inserting, the producer
/// compares the backing store's length with the capacity and raises the
/// cap-reached signal once it is met. Producers racing past that point can
/// leave a few extra records in the store, so [`into_records`](Self::into_records)
/// truncates to exactly `capacity`. Traversal units poll
/// [`is_capped`](Self::is_capped) between siblings to stop expanding.
#[derive(Debug)]
pub struct ResultAggregator {
	capacity: usize,
	records_tx: Sender<MatchRecord>,
	records_rx: Receiver<MatchRecord>,
	capped: AtomicBool,
	cap_tx: Sender<()>,
	cap_rx: Receiver<()>,
}

impl ResultAggregator {
	/// Create a collector for at most `capacity` records. A capacity of zero
	/// starts out capped.
	pub fn new(capacity: usize) -> Self {
		let (records_tx, records_rx) = unbounded();
		let (cap_tx, cap_rx) = bounded(1);
		let aggregator = Self {
			capacity,
			records_tx,
			records_rx,
			capped: AtomicBool::new(false),
			cap_tx,
			cap_rx,
		};
		if capacity == 0 {
			aggregator.raise_cap();
		}
		aggregator
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Accept a record and raise the cap-reached signal if the store is full.
	pub fn push(&self, record: MatchRecord) {
		let _ = self.records_tx.send(record);
		if self.records_tx.len() >= self.capacity {
			self.raise_cap();
		}
	}

	/// Records currently held, which may briefly exceed the capacity.
	pub fn len(&self) -> usize {
		self.records_rx.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records_rx.is_empty()
	}

	/// Whether enough records have been collected to stop traversal.
	pub fn is_capped(&self) -> bool {
		self.capped.load(Ordering::Acquire)
	}

	/// Receiver that yields a single message when the cap is first reached.
	pub fn cap_signal(&self) -> &Receiver<()> {
		&self.cap_rx
	}

	/// Drain the store, truncated to the capacity.
	pub fn into_records(self) -> Vec<MatchRecord> {
		let Self {
			capacity,
			records_tx,
			records_rx,
			..
		} = self;
		drop(records_tx);
		records_rx.into_iter().take(capacity).collect()
	}

	fn raise_cap(&self) {
		if !self.capped.swap(true, Ordering::AcqRel) {
			let _ = self.cap_tx.try_send(());
		}
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use std::thread;
	use std::time::SystemTime;

	use super::*;

	fn record(name: &str) -> MatchRecord {
		MatchRecord::new(PathBuf::from("/tmp"), name.to_string(), 1, SystemTime::now(), false)
	}

	#[test]
	fn raises_signal_at_capacity() {
		let aggregator = ResultAggregator::new(2);
		aggregator.push(record("a"));
		assert!(!aggregator.is_capped());
		aggregator.push(record("b"));
		assert!(aggregator.is_capped());
		assert!(aggregator.cap_signal().try_recv().is_ok());
	}

	#[test]
	fn accepts_overflow_but_truncates_on_drain() {
		let aggregator = ResultAggregator::new(2);
		for name in ["a", "b", "c", "d"] {
			aggregator.push(record(name));
		}
		assert_eq!(aggregator.len(), 4);
		assert_eq!(aggregator.into_records().len(), 2);
	}

	#[test]
	fn zero_capacity_starts_capped() {
		let aggregator = ResultAggregator::new(0);
		assert!(aggregator.is_capped());
		aggregator.push(record("a"));
		assert!(aggregator.into_records().is_empty());
	}

	#[test]
	fn concurrent_producers_never_exceed_capacity_after_drain() {
		let aggregator = ResultAggregator::new(50);
		thread::scope(|scope| {
			for worker in 0..8 {
				let aggregator = &aggregator;
				scope.spawn(move || {
					for idx in 0..20 {
						aggregator.push(record(&format!("{worker}-{idx}")));
					}
				});
			}
		});
		assert!(aggregator.is_capped());
		assert_eq!(aggregator.len(), 160);
		assert_eq!(aggregator.into_records().len(), 50);
	}
}
