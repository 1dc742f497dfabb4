use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dropcast")]
#[command(about = "Dropcast CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one publish cycle (retention sweep, select, publish)
    Run,
    /// Run the retention sweep only
    Prune,
    /// Show store and ledger counts
    Status,
}
