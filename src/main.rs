use anyhow::Result;
use clap::Parser;

use storefront::cli::commands::{show_usage_hints, DropsCommand, RunCommand};
use storefront::cli::{Cli, Commands};
use storefront::{config, init_config, init_telemetry};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_telemetry(&config()?.observability)?;
    init_config()?;

    match cli.command {
        // No subcommand: explain what the tool does
        None => {
            show_usage_hints();
            Ok(())
        }
        Some(Commands::Drops { at, catalog }) => {
            tokio::runtime::Runtime::new()?.block_on(async {
                DropsCommand::new()
                    .with_at(at)
                    .with_catalog(catalog)
                    .execute()
                    .await
            })
        }
        Some(Commands::Run { script, retries }) => {
            tokio::runtime::Runtime::new()?.block_on(async {
                RunCommand::new(script)
                    .with_retries(retries)
                    .execute()
                    .await
            })
        }
    }
}
