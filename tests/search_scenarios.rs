use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::{Duration, SystemTime};

use scour::{SearchEngine, SearchParams, SearchRequest, SizeRange, TimeRange};
use tempfile::TempDir;

/// Build the reference tree:
///
/// ```text
/// file1.txt  file2.doc  image.jpg
/// subfolder/subfile.txt  subfolder/another.pdf
/// hidden/.hidden_file.txt
/// ```
fn scenario() -> TempDir {
	let dir = TempDir::new().unwrap();
	let root = dir.path();
	for name in ["file1.txt", "file2.doc", "image.jpg"] {
		File::create(root.join(name)).unwrap();
	}
	fs::create_dir(root.join("subfolder")).unwrap();
	File::create(root.join("subfolder/subfile.txt")).unwrap();
	File::create(root.join("subfolder/another.pdf")).unwrap();
	fs::create_dir(root.join("hidden")).unwrap();
	File::create(root.join("hidden/.hidden_file.txt")).unwrap();
	dir
}

fn relative_names(root: &Path, request: &SearchRequest) -> BTreeSet<String> {
	SearchEngine::new()
		.search(request)
		.unwrap()
		.records
		.iter()
		.map(|record| {
			record
				.full_path()
				.strip_prefix(root)
				.unwrap()
				.to_string_lossy()
				.replace('\\', "/")
		})
		.collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
	names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn wildcard_without_hidden_entries() {
	let dir = scenario();
	let request = SearchRequest::new("*.txt", [dir.path()]);
	assert_eq!(
		relative_names(dir.path(), &request),
		set(&["file1.txt", "subfolder/subfile.txt"])
	);
}

#[test]
fn wildcard_with_hidden_entries() {
	let dir = scenario();
	let request = SearchRequest::new("*.txt", [dir.path()]).with_hidden(true);
	assert_eq!(
		relative_names(dir.path(), &request),
		set(&["file1.txt", "subfolder/subfile.txt", "hidden/.hidden_file.txt"])
	);
}

#[test]
fn extension_filter_keeps_only_listed_types() {
	let dir = scenario();
	let request = SearchRequest::new("*", [dir.path()]).with_extensions(["doc"]);
	assert_eq!(relative_names(dir.path(), &request), set(&["file2.doc"]));
}

#[test]
fn regex_matches_substrings() {
	let dir = scenario();
	let request = SearchRequest::new(r"file\d", [dir.path()]).with_regex(true);
	assert_eq!(
		relative_names(dir.path(), &request),
		set(&["file1.txt", "file2.doc"])
	);
}

#[test]
fn hidden_directories_contribute_no_descendants() {
	let dir = scenario();
	fs::create_dir(dir.path().join(".cache")).unwrap();
	File::create(dir.path().join(".cache/visible.txt")).unwrap();

	let request = SearchRequest::new("*.txt", [dir.path()]);
	let names = relative_names(dir.path(), &request);
	assert!(!names.iter().any(|name| name.starts_with(".cache")));
}

#[test]
fn directory_named_like_an_archive_passes_extension_filter() {
	let dir = scenario();
	fs::create_dir(dir.path().join("archive.zip")).unwrap();
	File::create(dir.path().join("archive.zip/inner.txt")).unwrap();

	let request = SearchRequest::new("*", [dir.path()]).with_extensions(["zip"]);
	assert_eq!(relative_names(dir.path(), &request), set(&["archive.zip"]));
}

#[test]
fn extension_filter_does_not_stop_descent() {
	let dir = scenario();
	let request = SearchRequest::new("*", [dir.path()]).with_extensions(["pdf"]);
	assert_eq!(
		relative_names(dir.path(), &request),
		set(&["subfolder/another.pdf"])
	);
}

#[test]
fn unreadable_root_leaves_other_roots_searchable() {
	let dir = scenario();
	let request = SearchRequest::new("*.txt", [dir.path().join("file1.txt"), dir.path().join("subfolder")]);

	let outcome = SearchEngine::new().search(&request).unwrap();

	assert_eq!(outcome.stats.access_errors, 1);
	assert_eq!(outcome.records.len(), 1);
	assert_eq!(outcome.records[0].name(), "subfile.txt");
}

#[test]
fn max_depth_bounds_distance_from_root() {
	let dir = TempDir::new().unwrap();
	fs::create_dir_all(dir.path().join("l1/l2/l3")).unwrap();
	File::create(dir.path().join("top.txt")).unwrap();
	File::create(dir.path().join("l1/one.txt")).unwrap();
	File::create(dir.path().join("l1/l2/two.txt")).unwrap();
	File::create(dir.path().join("l1/l2/l3/three.txt")).unwrap();

	let shallow = SearchRequest::new("*.txt", [dir.path()]).with_max_depth(Some(0));
	assert_eq!(relative_names(dir.path(), &shallow), set(&["top.txt"]));

	let medium = SearchRequest::new("*.txt", [dir.path()]).with_max_depth(Some(1));
	assert_eq!(
		relative_names(dir.path(), &medium),
		set(&["top.txt", "l1/one.txt"])
	);
}

#[test]
fn result_cap_is_never_exceeded() {
	let dir = TempDir::new().unwrap();
	for idx in 0..40 {
		let sub = dir.path().join(format!("dir{idx}"));
		fs::create_dir(&sub).unwrap();
		for file in 0..10 {
			File::create(sub.join(format!("f{file}.log"))).unwrap();
		}
	}

	for cap in [1, 7, 50] {
		let request = SearchRequest::new("*.log", [dir.path()])
			.with_max_results(cap)
			.with_threads(8);
		let outcome = SearchEngine::new().search(&request).unwrap();
		assert_eq!(outcome.records.len(), cap);
		assert!(outcome.capped);
	}
}

#[test]
fn size_and_time_filters_are_inclusive() {
	let dir = TempDir::new().unwrap();
	let mut small = File::create(dir.path().join("small.bin")).unwrap();
	small.write_all(&[0; 10]).unwrap();
	let mut large = File::create(dir.path().join("large.bin")).unwrap();
	large.write_all(&[0; 100]).unwrap();

	let request = SearchRequest::new("*.bin", [dir.path()])
		.with_size(SizeRange::new(Some(10), Some(50)));
	assert_eq!(relative_names(dir.path(), &request), set(&["small.bin"]));

	let now = SystemTime::now();
	let recent = SearchRequest::new("*.bin", [dir.path()]).with_modified(TimeRange::new(
		Some(now - Duration::from_secs(3600)),
		Some(now + Duration::from_secs(3600)),
	));
	assert_eq!(relative_names(dir.path(), &recent).len(), 2);

	let future = SearchRequest::new("*.bin", [dir.path()])
		.with_modified(TimeRange::new(Some(now + Duration::from_secs(3600)), None));
	assert!(relative_names(dir.path(), &future).is_empty());
}

#[test]
fn params_drive_the_same_search() {
	let dir = scenario();
	let params: SearchParams = serde_json::from_value(serde_json::json!({
		"query": "*",
		"paths": [dir.path()],
		"file_types": ["pdf"],
		"max_depth": 1,
	}))
	.unwrap();
	let defaults = scour::SearchDefaults {
		paths: Vec::new(),
		max_results: 500,
		threads: Some(2),
		include_hidden: false,
		max_depth: None,
	};

	let request = params.into_request(&defaults);
	assert_eq!(
		relative_names(dir.path(), &request),
		set(&["subfolder/another.pdf"])
	);
}

#[test]
fn concurrent_engines_do_not_share_results() {
	let first = scenario();
	let second = TempDir::new().unwrap();
	for idx in 0..20 {
		File::create(second.path().join(format!("other{idx}.txt"))).unwrap();
	}

	thread::scope(|scope| {
		let a = scope.spawn(|| {
			let request = SearchRequest::new("*.txt", [first.path()]).with_threads(3);
			SearchEngine::new().search(&request).unwrap()
		});
		let b = scope.spawn(|| {
			let request = SearchRequest::new("*.txt", [second.path()]).with_threads(3);
			SearchEngine::new().search(&request).unwrap()
		});

		let a = a.join().unwrap();
		let b = b.join().unwrap();
		assert_eq!(a.records.len(), 2);
		assert_eq!(b.records.len(), 20);
		assert!(a.records.iter().all(|r| r.full_path().starts_with(first.path())));
		assert!(b.records.iter().all(|r| r.full_path().starts_with(second.path())));
	});
}

#[test]
fn one_engine_serves_parallel_searches() {
	let dir = scenario();
	let engine = SearchEngine::new();

	thread::scope(|scope| {
		let handles = (0..4)
			.map(|_| {
				scope.spawn(|| {
					let request = SearchRequest::new("*.txt", [dir.path()]);
					engine.search(&request).unwrap().records.len()
				})
			})
			.collect::<Vec<_>>();
		for handle in handles {
			assert_eq!(handle.join().unwrap(), 2);
		}
	});
}
