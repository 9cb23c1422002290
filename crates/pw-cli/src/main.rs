//! `pickwise` binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pw_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries reports.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "pickwise starting");
    pw_cli::run(cli).await
}
