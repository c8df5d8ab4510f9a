//! Concurrent filesystem search.
//!
//! A search compiles its query, seeds one traversal unit per root and lets a
//! bounded pool of workers expand directories breadth-wise through a shared
//! queue. Matches flow into a [`ResultAggregator`]; a [`CompletionTracker`]
//! reports when no unit is queued or running anymore.

mod aggregator;
mod engine;
mod params;
mod record;
mod request;
mod scheduler;
mod tracker;

pub use aggregator::ResultAggregator;
pub use engine::{DEFAULT_MAX_THREADS, SearchEngine, SearchOutcome};
pub use params::{SearchDefaults, SearchParams, SearchResponse, end_of_day, start_of_day};
pub use record::{IconClass, MatchRecord, format_size, format_time};
pub use request::{
	DEFAULT_MAX_RESULTS, QUICK_MAX_DEPTH, QUICK_MAX_RESULTS, QUICK_THREADS, SearchRequest,
};
pub use scheduler::TraversalStats;
pub use tracker::{CompletionTracker, UnitGuard};
