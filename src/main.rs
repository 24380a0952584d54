use anyhow::Result;
use clap::Parser;
use resume_scan::cli::{handle_scan_command, ScanCli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; results stay on stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = ScanCli::parse();
    handle_scan_command(cli).await
}
