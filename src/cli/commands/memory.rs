//! `cogent memory` - inspect long-term memory.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::domain::models::Config;
use crate::domain::ports::{MemoryRecord, MemoryStore};
use crate::infrastructure::build_memory;

#[derive(Debug, Args)]
pub struct MemoryArgs {
    #[command(subcommand)]
    pub command: MemoryCommands,
}

#[derive(Debug, Subcommand)]
pub enum MemoryCommands {
    /// Search long-term memory by substring
    Recall {
        /// Text to match against record contents
        query: String,

        /// Maximum records to return
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Show the most recently written records
    Recent {
        /// Maximum records to return
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

pub async fn execute(args: MemoryArgs, config: &Config) -> Result<()> {
    let memory = build_memory(config).await?;

    let records = match args.command {
        MemoryCommands::Recall { query, limit } => memory.recall_long_term(&query, limit).await?,
        MemoryCommands::Recent { limit } => memory.recent_long_term(limit).await?,
    };

    if records.is_empty() {
        println!("{}", style("No matching records.").dim());
        return Ok(());
    }

    for record in records {
        print_record(&record);
    }
    Ok(())
}

fn print_record(record: &MemoryRecord) {
    println!("{} {}", style(&record.id).bold(), style(record.tags.join(",")).dim());
    for line in record.text.lines().take(3) {
        println!("  {line}");
    }
}
