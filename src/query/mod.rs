//! Name matching and entry filtering.
//!
//! Everything in here is compiled once per search, before any directory is
//! opened, and then shared read-only by every traversal worker.

mod filters;
mod matcher;

pub use filters::{EntryFilters, SizeRange, TimeRange, extension_of, normalize_extension};
pub use matcher::{QueryError, QueryMatcher};
