//! Cogent CLI entry point.

use clap::Parser;

use cogent::cli::{Cli, Commands};
use cogent::infrastructure::{logging, ConfigLoader};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => cogent::cli::handle_error(&err),
    };
    logging::init(&config.logging);

    let result = match cli.command {
        Commands::Run(args) => cogent::cli::commands::run::execute(args, &config).await,
        Commands::Memory(args) => cogent::cli::commands::memory::execute(args, &config).await,
        Commands::Audit(args) => cogent::cli::commands::audit::execute(args, &config).await,
    };

    if let Err(err) = result {
        cogent::cli::handle_error(&err);
    }
}
