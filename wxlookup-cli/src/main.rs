//! Binary crate for the `wxlookup` weather widget.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Driving the widget from the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod repl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the widget output on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
