//! Mediastore CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    // RUST_LOG wins; otherwise stay quiet except for our own warnings.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mediastore=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = Cli::parse().execute().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
