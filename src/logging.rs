//! Log subscriber setup for the `scour` binary.
//!
//! The library only emits `tracing` events; embedders decide where they go.
//! The binary routes them to stderr so that JSON written to stdout stays
//! machine readable.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted before the CLI supplied level.
pub const LOG_ENV: &str = "SCOUR_LOG";

/// Install a formatted stderr subscriber.
///
/// `SCOUR_LOG` takes precedence over `default_level`; both accept the usual
/// `EnvFilter` directives such as `debug` or `scour::search=trace`. Calling
/// this more than once is harmless, later calls are ignored.
pub fn initialize(default_level: &str) {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.or_else(|_| EnvFilter::try_new(default_level))
		.unwrap_or_else(|_| EnvFilter::new("warn"));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}
