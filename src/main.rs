use std::process;

use cartographer::cli::{Args, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    init_tracing(args.verbose);

    let command = Command::from_args(args);
    let exit_code = command.run();

    process::exit(exit_code);
}

/// Log to stderr, honouring `RUST_LOG` over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
