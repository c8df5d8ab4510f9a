use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use scour::{
	CacheStats, IndexCache, IndexOptions, IndexSnapshot, SearchDefaults, SearchEngine,
	SearchParams, SearchRequest, SearchResponse,
};

use crate::cli::{Command, DirArgs, QuickArgs, SearchArgs};
use crate::settings::ResolvedConfig;

/// What a finished command produced, ready to be printed.
#[derive(Debug)]
pub(crate) enum Report {
	Search(SearchResponse),
	Listing(Listing),
	Invalidated(PathBuf),
}

#[derive(Debug)]
pub(crate) struct Listing {
	pub(crate) snapshot: Arc<IndexSnapshot>,
	pub(crate) stats: CacheStats,
}

/// Coordinates running one CLI command against the resolved configuration.
pub(crate) struct Workflow {
	engine: SearchEngine,
	defaults: SearchDefaults,
	index: IndexOptions,
}

impl Workflow {
	pub(crate) fn from_config(config: &ResolvedConfig) -> Self {
		Self {
			engine: SearchEngine::new(),
			defaults: config.search_defaults(),
			index: config.index_options(),
		}
	}

	pub(crate) fn run(&self, command: Command) -> Result<Report> {
		match command {
			Command::Search(args) => self.search(args).map(Report::Search),
			Command::Quick(args) => self.quick(args).map(Report::Search),
			Command::List(args) => self.list(&args).map(Report::Listing),
			Command::Invalidate(args) => Ok(Report::Invalidated(self.invalidate(&args))),
		}
	}

	fn search(&self, args: SearchArgs) -> Result<SearchResponse> {
		let params = SearchParams {
			query: args.query,
			paths: (!args.paths.is_empty()).then_some(args.paths),
			file_types: (!args.types.is_empty()).then_some(args.types),
			date_from: args.from,
			date_to: args.to,
			size_min: args.min_size,
			size_max: args.max_size,
			use_regex: args.regex,
			case_sensitive: args.case_sensitive,
			// Already folded into the defaults by the settings layer.
			include_hidden: None,
			max_depth: None,
		};
		let request = params.into_request(&self.defaults);
		self.execute(&request)
	}

	fn quick(&self, args: QuickArgs) -> Result<SearchResponse> {
		if args.query.trim().is_empty() {
			return Ok(SearchResponse::empty(args.query));
		}

		let root = match args.path {
			Some(path) => path,
			None => self
				.defaults
				.paths
				.first()
				.cloned()
				.ok_or_else(|| anyhow!("no search path given and no default paths configured"))?,
		};
		self.execute(&SearchRequest::quick(args.query, root))
	}

	fn execute(&self, request: &SearchRequest) -> Result<SearchResponse> {
		let outcome = self
			.engine
			.search(request)
			.with_context(|| format!("cannot search for '{}'", request.query))?;
		Ok(SearchResponse::new(request.query.clone(), outcome))
	}

	fn list(&self, args: &DirArgs) -> Result<Listing> {
		let directory = fs::canonicalize(&args.dir)
			.with_context(|| format!("failed to resolve directory {}", args.dir.display()))?;
		let cache = IndexCache::new(self.index.clone());
		let snapshot = cache.get(&directory);
		Ok(Listing {
			snapshot,
			stats: cache.stats(),
		})
	}

	fn invalidate(&self, args: &DirArgs) -> PathBuf {
		// The directory may be gone already; fall back to the path as given.
		let directory = canonical_or_given(&args.dir);
		IndexCache::new(self.index.clone()).invalidate(&directory);
		directory
	}
}

fn canonical_or_given(path: &Path) -> PathBuf {
	fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
