//! Binary crate for the `ds` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI flags into one action
//! - Interactive location and API key prompts
//! - Printing the forecast table and status messages

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod prompt;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();

    if let Err(err) = cmd.run().await {
        output::error(&err);
        std::process::exit(1);
    }
}
