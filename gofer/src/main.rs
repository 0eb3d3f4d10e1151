mod commands;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    Cli::parse().run()
}

/// Log to stderr, filtered by `GOFER_LOG` (warnings only by default).
fn init_logging() {
    let filter = EnvFilter::try_from_env("GOFER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
