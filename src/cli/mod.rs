mod args;
mod output;

pub(crate) use args::{
	CliArgs, Command, DEFAULT_LOG_LEVEL, DirArgs, OutputFormat, QuickArgs, SearchArgs, parse_cli,
};
pub(crate) use output::{print_json, print_plain};
