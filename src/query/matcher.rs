use globset::{GlobBuilder, GlobMatcher};
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// A pattern that could not be compiled into a matcher.
#[derive(Debug, Error)]
pub enum QueryError {
	#[error("invalid wildcard pattern '{pattern}': {source}")]
	Wildcard {
		pattern: String,
		#[source]
		source: globset::Error,
	},

	#[error("invalid regular expression '{pattern}': {source}")]
	Regex {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// Compiled entry-name predicate.
///
/// The two modes anchor differently:
///
/// - wildcard patterns (`*`, `?`, `[set]`) must match the **whole** name, so
///   `*.txt` accepts `note.txt` but rejects `note.txt.bak`;
/// - regular expressions are searched **anywhere** in the name, so `file\d`
///   accepts `myfile1backup`.
///
/// Users switching modes are regularly surprised by this. Anchor the
/// expression yourself (`^...$`) when a full match is wanted in regex mode.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
	kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
	Wildcard(GlobMatcher),
	Regex(Regex),
}

impl QueryMatcher {
	/// Compile `pattern` in the requested mode.
	///
	/// Case folding is configured on the compiled automaton rather than by
	/// lowercasing names at match time.
	pub fn compile(
		pattern: &str,
		use_regex: bool,
		case_sensitive: bool,
	) -> Result<Self, QueryError> {
		if use_regex {
			Self::regex(pattern, case_sensitive)
		} else {
			Self::wildcard(pattern, case_sensitive)
		}
	}

	/// Compile a shell-style wildcard. An empty pattern matches every name.
	pub fn wildcard(pattern: &str, case_sensitive: bool) -> Result<Self, QueryError> {
		let effective = if pattern.is_empty() { "*" } else { pattern };
		let glob = GlobBuilder::new(effective)
			.case_insensitive(!case_sensitive)
			.literal_separator(false)
			.backslash_escape(true)
			.build()
			.map_err(|source| QueryError::Wildcard {
				pattern: pattern.to_string(),
				source,
			})?;

		Ok(Self {
			kind: MatcherKind::Wildcard(glob.compile_matcher()),
		})
	}

	/// Compile a regular expression used for unanchored search.
	pub fn regex(pattern: &str, case_sensitive: bool) -> Result<Self, QueryError> {
		let regex = RegexBuilder::new(pattern)
			.case_insensitive(!case_sensitive)
			.build()
			.map_err(|source| QueryError::Regex {
				pattern: pattern.to_string(),
				source,
			})?;

		Ok(Self {
			kind: MatcherKind::Regex(regex),
		})
	}

	/// Whether `name` (a single path component) satisfies the pattern.
	pub fn matches(&self, name: &str) -> bool {
		match &self.kind {
			MatcherKind::Wildcard(glob) => glob.is_match(name),
			MatcherKind::Regex(regex) => regex.is_match(name),
		}
	}

	/// True when the matcher was compiled from a regular expression.
	pub fn is_regex(&self) -> bool {
		matches!(self.kind, MatcherKind::Regex(_))
	}
}
