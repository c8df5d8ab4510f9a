use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches, Parser};

use super::{CliArgs, Command, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn search_arguments_are_parsed() {
	let cli = CliArgs::parse_from([
		"scour",
		"search",
		"*.txt",
		"/srv",
		"/home",
		"--types",
		"txt,md",
		"--max-depth",
		"2",
		"--hidden",
		"-o",
		"json",
	]);

	assert_eq!(cli.output, OutputFormat::Json);
	let args = cli.search_args().expect("search args");
	assert_eq!(args.query, "*.txt");
	assert_eq!(args.paths, vec![PathBuf::from("/srv"), PathBuf::from("/home")]);
	assert_eq!(args.types, vec!["txt", "md"]);
	assert_eq!(args.max_depth, Some(2));
	assert!(args.hidden);
	assert!(!args.regex);
}

#[test]
fn global_flags_work_without_subcommand() {
	let command = CliArgs::command();
	let mut matches = command.get_matches_from(vec!["scour", "--print-config"]);
	let parsed = CliArgs::from_arg_matches_mut(&mut matches).expect("parses");
	assert!(parsed.print_config);
	assert!(parsed.command.is_none());
	assert_eq!(parsed.output, OutputFormat::Plain);
}

#[test]
fn list_and_invalidate_take_a_directory() {
	let cli = CliArgs::parse_from(["scour", "list", "/data"]);
	assert!(matches!(cli.command, Some(Command::List(ref args)) if args.dir == PathBuf::from("/data")));

	let cli = CliArgs::parse_from(["scour", "invalidate", "/data"]);
	assert!(matches!(cli.command, Some(Command::Invalidate(_))));
	assert!(cli.search_args().is_none());
}
