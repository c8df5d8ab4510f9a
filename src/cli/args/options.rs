use clap::ValueEnum;

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

/// Log level used when neither `--log-level` nor `SCOUR_LOG` is given.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "warn";
