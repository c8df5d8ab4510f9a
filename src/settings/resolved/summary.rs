use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	for line in summary_lines(config) {
		println!("{line}");
	}
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
	let search = &config.search;
	let cache = &config.cache;
	let mut lines = vec!["Effective configuration:".to_string()];

	let paths = search
		.default_paths
		.iter()
		.map(|path| path.display().to_string())
		.collect::<Vec<_>>();
	lines.push(format!("  Default paths: {}", paths.join(", ")));
	lines.push(format!("  Max results: {}", search.max_results));
	match search.threads {
		Some(threads) => lines.push(format!("  Threads: {threads}")),
		None => lines.push("  Threads: automatic".to_string()),
	}
	lines.push(format!(
		"  Include hidden: {}",
		bool_to_word(search.include_hidden)
	));
	match search.max_depth {
		Some(depth) => lines.push(format!("  Max depth: {depth}")),
		None => lines.push("  Max depth: unlimited".to_string()),
	}
	lines.push(format!("  Cache TTL: {}s", cache.ttl.as_secs()));
	lines.push(format!("  Persist cache: {}", bool_to_word(cache.persist)));
	lines.push(format!(
		"  Cache directory: {}",
		cache
			.dir
			.as_ref()
			.map(|dir| dir.display().to_string())
			.unwrap_or_else(|| "(platform default)".to_string())
	));
	lines
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
