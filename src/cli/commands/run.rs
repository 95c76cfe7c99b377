//! `cogent run` - execute a goal's task list.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;

use crate::domain::models::{Config, Task};
use crate::domain::ports::AuditSink;
use crate::infrastructure::{build_memory, build_orchestrator, FsAuditSink};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Goal being pursued; recorded in short-term memory
    #[arg(long)]
    pub goal: String,

    /// Path to a YAML/JSON file with the dependency-ordered task list
    #[arg(long)]
    pub tasks: PathBuf,
}

pub async fn execute(args: RunArgs, config: &Config) -> Result<()> {
    let raw = std::fs::read_to_string(&args.tasks)
        .with_context(|| format!("Failed to read task file {}", args.tasks.display()))?;
    let tasks: Vec<Task> = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse task file {}", args.tasks.display()))?;

    let task_count = tasks.len();
    let memory = build_memory(config).await?;
    let mut orchestrator = build_orchestrator(config, memory)?;

    println!("{} {}", style("Goal:").bold(), args.goal);
    println!("{} {}", style("Tasks:").bold(), task_count);

    let reason = orchestrator.run_goal(&args.goal, tasks).await?;

    let state = orchestrator.state();
    println!();
    println!("{} {}", style("Halt:").bold(), reason);
    println!(
        "{} {}/{}",
        style("Completed:").bold(),
        state.completed_tasks,
        task_count
    );

    let sink = FsAuditSink::new(&config.audit.dir);
    let episodes = sink.load_recent_episodes(task_count).await?;
    if !episodes.is_empty() {
        println!();
        println!("{}", style("Episodes:").bold());
        for episode in episodes {
            let marker = if episode.success {
                style("ok").green()
            } else {
                style("failed").red()
            };
            println!("  {} [{}] {}", episode.task_id, marker, episode.timestamp);
        }
    }

    Ok(())
}
