//! Command-line interface for the FindIt server.

use clap::{Parser, Subcommand};

/// FindIt - Lost & Found classifieds backend
#[derive(Parser)]
#[command(name = "findit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web API server
    #[command(alias = "-s", alias = "--serve")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Seed demo records (a sample user and a few listings)
    Seed,

    /// Show recent audit-trail entries
    Activity {
        /// Number of entries to show
        #[arg(default_value = "20")]
        limit: u64,
    },
}
