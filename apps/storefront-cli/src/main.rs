//! # storefront
//!
//! Terminal storefront. See the `storefront_cli` library for the commands.

use clap::Parser;

use storefront_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    run(cli).await
}
