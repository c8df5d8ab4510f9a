use anyhow::Result;
use scour::search::format_time;
use scour::{EntryDescriptor, SearchResponse};
use serde_json::{Value, json};

use crate::workflow::{Listing, Report};

/// Print a plain-text representation of a command's report.
pub(crate) fn print_plain(report: &Report) {
	for line in format_plain(report) {
		println!("{line}");
	}
}

/// Print the JSON representation of a command's report.
pub(crate) fn print_json(report: &Report) -> Result<()> {
	println!("{}", format_report_json(report)?);
	Ok(())
}

fn format_plain(report: &Report) -> Vec<String> {
	match report {
		Report::Search(response) => plain_search(response),
		Report::Listing(listing) => plain_listing(listing),
		Report::Invalidated(dir) => vec![format!("Invalidated {}", dir.display())],
	}
}

fn plain_search(response: &SearchResponse) -> Vec<String> {
	let mut lines = response
		.results
		.iter()
		.map(|record| {
			format!(
				"{}\t{}\t{}",
				record.full_path().display(),
				record.size_formatted(),
				record.modified_formatted()
			)
		})
		.collect::<Vec<_>>();
	lines.push(format!(
		"{} result{} in {:.3}s",
		response.count,
		if response.count == 1 { "" } else { "s" },
		response.time
	));
	lines
}

fn plain_listing(listing: &Listing) -> Vec<String> {
	let mut lines = listing
		.snapshot
		.entries
		.iter()
		.map(|entry| {
			let suffix = if entry.is_dir { "/" } else { "" };
			format!("{}{suffix}", entry.full_path.display())
		})
		.collect::<Vec<_>>();
	lines.push(format!(
		"{} entries under {} (captured {})",
		listing.snapshot.len(),
		listing.snapshot.directory.display(),
		format_time(listing.snapshot.captured_at)
	));
	lines
}

/// Format a command's report as a JSON string.
pub(crate) fn format_report_json(report: &Report) -> Result<String> {
	let payload = match report {
		Report::Search(response) => serde_json::to_value(response)?,
		Report::Listing(listing) => json!({
			"directory": listing.snapshot.directory.to_string_lossy(),
			"captured_at": format_time(listing.snapshot.captured_at),
			"count": listing.snapshot.len(),
			"entries": listing.snapshot.entries.iter().map(entry_json).collect::<Vec<_>>(),
			"stats": listing.stats,
		}),
		Report::Invalidated(dir) => json!({ "invalidated": dir.to_string_lossy() }),
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

fn entry_json(entry: &EntryDescriptor) -> Value {
	json!({
		"name": entry.name_lossy(),
		"path": entry.parent.to_string_lossy(),
		"full_path": entry.full_path.to_string_lossy(),
		"size": entry.size,
		"modified_time_formatted": format_time(entry.modified),
		"is_directory": entry.is_dir,
	})
}
