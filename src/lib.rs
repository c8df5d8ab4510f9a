//! Concurrent filesystem search for `scour`.
//!
//! The crate is split into three layers. [`query`] compiles a name pattern and
//! the entry filters of a request, [`search`] walks one or more roots on a
//! bounded worker pool and collects capped results, and [`index`] keeps TTL
//! snapshots of directory listings so that "list this directory" does not have
//! to rescan the disk every time.

pub mod app_dirs;
pub mod index;
pub mod logging;
pub mod query;
pub mod search;

pub use index::{
	CacheIoError, CacheStats, EntryDescriptor, IndexCache, IndexOptions, IndexSnapshot,
};
pub use query::{EntryFilters, QueryError, QueryMatcher, SizeRange, TimeRange};
pub use search::{
	IconClass, MatchRecord, SearchDefaults, SearchEngine, SearchOutcome, SearchParams,
	SearchRequest, SearchResponse,
};
