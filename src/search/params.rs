//! Loosely-typed search parameters as they arrive from a caller, and the
//! response envelope sent back.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::engine::SearchOutcome;
use super::record::MatchRecord;
use super::request::SearchRequest;
use crate::query::{SizeRange, TimeRange};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Request fields with optional values, before defaults are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
	pub query: String,
	pub paths: Option<Vec<PathBuf>>,
	pub file_types: Option<Vec<String>>,
	/// `YYYY-MM-DD`, inclusive from the start of the day.
	pub date_from: Option<String>,
	/// `YYYY-MM-DD`, inclusive until 23:59:59 of the day.
	pub date_to: Option<String>,
	pub size_min: Option<u64>,
	pub size_max: Option<u64>,
	pub use_regex: bool,
	pub case_sensitive: bool,
	pub include_hidden: Option<bool>,
	pub max_depth: Option<usize>,
}

/// Values substituted for parameters the caller left out.
#[derive(Debug, Clone)]
pub struct SearchDefaults {
	pub paths: Vec<PathBuf>,
	pub max_results: usize,
	pub threads: Option<usize>,
	pub include_hidden: bool,
	pub max_depth: Option<usize>,
}

impl SearchParams {
	/// Build a request, filling gaps from `defaults`.
	///
	/// Dates that fail to parse are dropped with a warning rather than
	/// rejecting the whole request.
	pub fn into_request(self, defaults: &SearchDefaults) -> SearchRequest {
		let roots = self
			.paths
			.filter(|paths| !paths.is_empty())
			.unwrap_or_else(|| defaults.paths.clone());

		let modified = TimeRange::new(
			self.date_from.as_deref().and_then(start_of_day),
			self.date_to.as_deref().and_then(end_of_day),
		);

		let mut request = SearchRequest::new(self.query, roots)
			.with_size(SizeRange::new(self.size_min, self.size_max))
			.with_modified(modified)
			.with_regex(self.use_regex)
			.with_case_sensitive(self.case_sensitive)
			.with_hidden(self.include_hidden.unwrap_or(defaults.include_hidden))
			.with_max_depth(self.max_depth.or(defaults.max_depth))
			.with_max_results(defaults.max_results);
		if let Some(file_types) = self.file_types {
			request = request.with_extensions(file_types);
		}
		if let Some(threads) = defaults.threads {
			request = request.with_threads(threads);
		}
		request
	}
}

/// Parse a date as local midnight.
pub fn start_of_day(raw: &str) -> Option<SystemTime> {
	local_time(raw, NaiveTime::MIN)
}

/// Parse a date as 23:59:59 local time.
pub fn end_of_day(raw: &str) -> Option<SystemTime> {
	local_time(raw, NaiveTime::from_hms_opt(23, 59, 59)?)
}

fn local_time(raw: &str, time: NaiveTime) -> Option<SystemTime> {
	let raw = raw.trim();
	if raw.is_empty() {
		return None;
	}
	let date = match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
		Ok(date) => date,
		Err(err) => {
			warn!(value = raw, error = %err, "ignoring unparseable date");
			return None;
		}
	};
	Local
		.from_local_datetime(&date.and_time(time))
		.earliest()
		.map(SystemTime::from)
}

/// Response envelope for a finished search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
	pub query: String,
	pub count: usize,
	/// Wall-clock seconds, rounded to milliseconds.
	pub time: f64,
	pub results: Vec<MatchRecord>,
}

impl SearchResponse {
	pub fn new(query: impl Into<String>, outcome: SearchOutcome) -> Self {
		Self {
			query: query.into(),
			count: outcome.records.len(),
			time: round_millis(outcome.elapsed),
			results: outcome.records,
		}
	}

	/// Response for a query too short to be worth running.
	pub fn empty(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			count: 0,
			time: 0.0,
			results: Vec::new(),
		}
	}
}

fn round_millis(elapsed: Duration) -> f64 {
	(elapsed.as_secs_f64() * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
	use chrono::{DateTime, Timelike};

	use super::*;

	fn defaults() -> SearchDefaults {
		SearchDefaults {
			paths: vec![PathBuf::from("/home/user")],
			max_results: 500,
			threads: Some(4),
			include_hidden: false,
			max_depth: None,
		}
	}

	#[test]
	fn missing_paths_fall_back_to_defaults() {
		let params: SearchParams = serde_json::from_str(r#"{"query": "*.txt"}"#).unwrap();
		let request = params.into_request(&defaults());
		assert_eq!(request.roots, vec![PathBuf::from("/home/user")]);
		assert_eq!(request.max_results, 500);
		assert_eq!(request.thread_count(), 4);
		assert!(!request.include_hidden);
	}

	#[test]
	fn configured_hidden_and_depth_apply_when_absent() {
		let defaults = SearchDefaults {
			include_hidden: true,
			max_depth: Some(1),
			..defaults()
		};
		let request = SearchParams::default().into_request(&defaults);
		assert!(request.include_hidden);
		assert_eq!(request.max_depth, Some(1));

		let params: SearchParams =
			serde_json::from_str(r#"{"include_hidden": false, "max_depth": 4}"#).unwrap();
		let request = params.into_request(&defaults);
		assert!(!request.include_hidden);
		assert_eq!(request.max_depth, Some(4));
	}

	#[test]
	fn explicit_fields_are_carried_over() {
		let params: SearchParams = serde_json::from_str(
			r#"{
				"query": "report",
				"paths": ["/srv"],
				"file_types": ["PDF"],
				"size_min": 10,
				"use_regex": true,
				"include_hidden": true,
				"max_depth": 3
			}"#,
		)
		.unwrap();
		let request = params.into_request(&defaults());
		assert_eq!(request.roots, vec![PathBuf::from("/srv")]);
		assert!(request.use_regex);
		assert!(request.include_hidden);
		assert_eq!(request.max_depth, Some(3));
		assert_eq!(request.size, SizeRange::new(Some(10), None));
		assert!(request.filters().extensions().unwrap().contains("pdf"));
	}

	#[test]
	fn date_bounds_cover_whole_days() {
		let from = DateTime::<Local>::from(start_of_day("2024-03-01").unwrap());
		assert_eq!((from.hour(), from.minute(), from.second()), (0, 0, 0));

		let to = DateTime::<Local>::from(end_of_day("2024-03-01").unwrap());
		assert_eq!((to.hour(), to.minute(), to.second()), (23, 59, 59));
	}

	#[test]
	fn invalid_dates_are_ignored() {
		assert!(start_of_day("03/01/2024").is_none());
		assert!(end_of_day("").is_none());

		let params = SearchParams {
			query: "x".into(),
			date_from: Some("yesterday".into()),
			..SearchParams::default()
		};
		assert!(params.into_request(&defaults()).modified.is_unbounded());
	}

	#[test]
	fn response_rounds_time_and_counts_results() {
		let response = SearchResponse::new(
			"q",
			SearchOutcome {
				records: Vec::new(),
				capped: false,
				stats: Default::default(),
				elapsed: Duration::from_micros(12_345_678),
			},
		);
		assert_eq!(response.count, 0);
		assert!((response.time - 12.346).abs() < 1e-9);

		let value = serde_json::to_value(SearchResponse::empty("q")).unwrap();
		assert_eq!(value["count"], 0);
		assert_eq!(value["results"], serde_json::json!([]));
	}
}
