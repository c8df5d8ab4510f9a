use std::path::Path;
use std::time::UNIX_EPOCH;

use ignore::WalkBuilder;
use tracing::debug;

use super::snapshot::{EntryDescriptor, IndexSnapshot};

/// Walk `directory` recursively and capture every non-hidden descendant.
///
/// Hidden directories are pruned, so nothing beneath them is listed.
/// Unreadable entries are skipped. The capture time is taken after the walk.
pub(crate) fn scan(directory: &Path) -> IndexSnapshot {
	let mut entries = Vec::new();

	let walker = WalkBuilder::new(directory)
		.standard_filters(false)
		.hidden(true)
		.follow_links(false)
		.sort_by_file_name(|a, b| a.cmp(b))
		.build();

	for result in walker {
		let entry = match result {
			Ok(entry) => entry,
			Err(err) => {
				debug!(directory = %directory.display(), error = %err, "skipping unreadable index entry");
				continue;
			}
		};
		if entry.depth() == 0 {
			continue;
		}

		let is_dir = entry.file_type().is_some_and(|file_type| file_type.is_dir());
		let metadata = match entry.metadata() {
			Ok(metadata) => metadata,
			Err(err) => {
				debug!(path = %entry.path().display(), error = %err, "skipping index entry without metadata");
				continue;
			}
		};

		let path = entry.path();
		let parent = path.parent().unwrap_or(directory).to_path_buf();
		entries.push(EntryDescriptor {
			name: entry.file_name().to_os_string(),
			parent,
			full_path: path.to_path_buf(),
			size: if is_dir { 0 } else { metadata.len() },
			modified: metadata.modified().unwrap_or(UNIX_EPOCH),
			is_dir,
		});
	}

	debug!(directory = %directory.display(), entries = entries.len(), "indexed directory");
	IndexSnapshot::new(directory, entries)
}
