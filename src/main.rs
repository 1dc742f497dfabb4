mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use dropcast::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Run => commands::run(config).await?,
        Commands::Prune => commands::prune(config)?,
        Commands::Status => commands::status(config)?,
    }

    Ok(())
}
