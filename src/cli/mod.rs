//! Command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cogent",
    version,
    about = "Single-agent task orchestration engine"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a goal's task list through the orchestrator
    Run(commands::run::RunArgs),
    /// Inspect long-term memory
    Memory(commands::memory::MemoryArgs),
    /// Inspect the audit trail
    Audit(commands::audit::AuditArgs),
}

/// Print an error chain and exit non-zero.
pub fn handle_error(err: &anyhow::Error) -> ! {
    eprintln!("error: {err:#}");
    std::process::exit(1);
}
