use std::path::PathBuf;

use clap::{ArgAction, Args, ColorChoice, Parser, Subcommand};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `scour` binary.
#[derive(Parser, Debug)]
#[command(
	name = "scour",
	version,
	long_version = long_version(),
	about = "Concurrent filtered filesystem search",
	color = ColorChoice::Auto,
	styles = cli_styles(),
	arg_required_else_help = true
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "SCOUR_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		global = true,
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		global = true,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		long = "log-level",
		value_name = "LEVEL",
		global = true,
		help = "Log filter used when SCOUR_LOG is unset (default: warn)"
	)]
	pub(crate) log_level: Option<String>,
	#[command(subcommand)]
	pub(crate) command: Option<Command>,
}

impl CliArgs {
	/// Arguments of the `search` subcommand, if that is what was invoked.
	pub(crate) fn search_args(&self) -> Option<&SearchArgs> {
		match &self.command {
			Some(Command::Search(args)) => Some(args),
			_ => None,
		}
	}
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
	/// Search one or more directories for matching entries.
	Search(SearchArgs),
	/// Small, shallow search suited to type-ahead suggestions.
	Quick(QuickArgs),
	/// List every non-hidden descendant of a directory from the index cache.
	List(DirArgs),
	/// Drop the cached listing of a directory.
	Invalidate(DirArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SearchArgs {
	#[arg(value_name = "QUERY", help = "Wildcard pattern, or regular expression with --regex")]
	pub(crate) query: String,
	#[arg(
		value_name = "PATH",
		help = "Directories to search (default: search.default_paths)"
	)]
	pub(crate) paths: Vec<PathBuf>,
	#[arg(
		short = 'e',
		long,
		help = "Treat QUERY as a regular expression matched anywhere in the name (default: disabled)"
	)]
	pub(crate) regex: bool,
	#[arg(
		short = 's',
		long = "case-sensitive",
		help = "Match names case sensitively (default: disabled)"
	)]
	pub(crate) case_sensitive: bool,
	#[arg(
		short = 'H',
		long = "hidden",
		help = "Include entries whose name starts with a dot (default: search.include_hidden)"
	)]
	pub(crate) hidden: bool,
	#[arg(
		short = 'd',
		long = "max-depth",
		value_name = "NUM",
		help = "Limit directory traversal depth, roots are depth 0 (default: unlimited)"
	)]
	pub(crate) max_depth: Option<usize>,
	#[arg(
		short = 't',
		long = "types",
		value_delimiter = ',',
		value_name = "EXT",
		help = "Comma-separated file extensions to keep (default: all)"
	)]
	pub(crate) types: Vec<String>,
	#[arg(
		long = "from",
		value_name = "YYYY-MM-DD",
		help = "Keep entries modified on or after this day (default: unbounded)"
	)]
	pub(crate) from: Option<String>,
	#[arg(
		long = "to",
		value_name = "YYYY-MM-DD",
		help = "Keep entries modified on or before this day (default: unbounded)"
	)]
	pub(crate) to: Option<String>,
	#[arg(
		long = "min-size",
		value_name = "BYTES",
		help = "Keep files of at least this many bytes (default: unbounded)"
	)]
	pub(crate) min_size: Option<u64>,
	#[arg(
		long = "max-size",
		value_name = "BYTES",
		help = "Keep files of at most this many bytes (default: unbounded)"
	)]
	pub(crate) max_size: Option<u64>,
	#[arg(
		short = 'm',
		long = "max-results",
		value_name = "NUM",
		help = "Stop after this many matches (default: 500)"
	)]
	pub(crate) max_results: Option<usize>,
	#[arg(
		short = 'j',
		long,
		value_name = "NUM",
		help = "Number of traversal workers (default: automatic)"
	)]
	pub(crate) threads: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct QuickArgs {
	#[arg(value_name = "QUERY", help = "Wildcard pattern; an empty query returns nothing")]
	pub(crate) query: String,
	#[arg(
		value_name = "PATH",
		help = "Directory to search (default: first of search.default_paths)"
	)]
	pub(crate) path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct DirArgs {
	#[arg(value_name = "DIR", help = "Directory whose listing is cached")]
	pub(crate) dir: PathBuf,
}
