use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "NFT storefront drops listing and wallet action sequencing")]
#[command(long_about = "Storefront lists promotional NFT drops and sequences multi-transaction \
                       wallet flows with retry. Get started with 'storefront drops'.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List drops with live status and call to action
    Drops {
        /// Render the listing as of this RFC 3339 instant
        #[arg(long, help = "Instant to render at, e.g. 2022-06-16T08:00:00-04:00")]
        at: Option<String>,
        /// JSON catalog to use instead of the configured or bundled one
        #[arg(long, help = "Path to a drops JSON catalog")]
        catalog: Option<String>,
    },
    /// Run a scripted batch of wallet actions through the sequencer
    Run {
        /// TOML file with [[actions]] entries
        script: String,
        /// Number of times to retry a stalled batch
        #[arg(long, default_value = "0", help = "Retries after a recoverable failure")]
        retries: u32,
    },
}
