// CLI binary entry point for euphory
//
// This is the main entry point for the euphory command-line tool.

mod cli;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Config;

fn main() {
    let config = Config::parse();
    init_logging(config.verbose);

    if let Err(e) = cli::run(config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over the `--verbose` default.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
