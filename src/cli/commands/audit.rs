//! `cogent audit` - inspect the audit trail.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::domain::models::Config;
use crate::domain::ports::AuditSink;
use crate::infrastructure::FsAuditSink;

#[derive(Debug, Args)]
pub struct AuditArgs {
    #[command(subcommand)]
    pub command: AuditCommands,
}

#[derive(Debug, Subcommand)]
pub enum AuditCommands {
    /// Show the most recent episodes
    Episodes {
        /// Maximum episodes to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

pub async fn execute(args: AuditArgs, config: &Config) -> Result<()> {
    let sink = FsAuditSink::new(&config.audit.dir);

    match args.command {
        AuditCommands::Episodes { limit } => {
            let episodes = sink.load_recent_episodes(limit).await?;
            if episodes.is_empty() {
                println!("{}", style("No episodes recorded.").dim());
                return Ok(());
            }
            for episode in episodes {
                let marker = if episode.success {
                    style("ok").green()
                } else {
                    style("failed").red()
                };
                println!(
                    "{} [{}] {}",
                    style(&episode.task_id).bold(),
                    marker,
                    episode.timestamp
                );
                println!("  input:  {}", first_line(&episode.input));
                println!("  output: {}", first_line(&episode.output));
            }
        }
    }
    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
