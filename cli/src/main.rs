mod render;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Parser;
use duetrack_core::{
    parse_human_date, Channel, FileTaskRepository, NotificationPlatform, NotificationRequest,
    PermissionStatus, Task, TaskStore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "duetrack")]
#[command(about = "Track tasks against a safe date and a hard deadline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a new task (dates accept YYYY-MM-DD, today, tomorrow, +3d, +2w)
    Add {
        name: String,
        #[arg(short, long)]
        description: String,
        #[arg(long)]
        deadline: String,
        #[arg(long)]
        safe: String,
    },
    /// Replace a task's fields; its completion state is untouched
    Edit {
        id: i64,
        name: String,
        #[arg(short, long)]
        description: String,
        #[arg(long)]
        deadline: String,
        #[arg(long)]
        safe: String,
    },
    /// Mark a task completed
    Done { id: i64 },
    /// Reopen a completed task
    Restore { id: i64 },
    /// Delete a task permanently
    Delete { id: i64 },
    /// List all tasks
    List,
    /// Show completion statistics
    Stats,
}

/// CLI stand-in for the delivery platform: requests are written to the
/// log. Actual OS delivery is outside the core contract.
struct LogPlatform;

impl NotificationPlatform for LogPlatform {
    fn register_channel(&self, channel: &Channel) -> Result<()> {
        info!(id = %channel.id, name = %channel.name, "registered notification channel");
        Ok(())
    }

    fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    fn schedule(&self, request: &NotificationRequest) -> Result<()> {
        info!(
            trigger_ms = request.trigger_epoch_millis(),
            title = %request.title,
            body = %request.body,
            "scheduled notification"
        );
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{} must not be empty", field));
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let repo = FileTaskRepository::new(None)?;
    let platform = LogPlatform;
    platform.register_channel(&Channel::reminders())?;
    if platform.request_permission()? == PermissionStatus::Denied {
        eprintln!("Warning: notifications are not permitted; reminders will be silent.");
    }

    let mut store = TaskStore::new(repo, platform);
    if let Err(err) = store.load() {
        // Destructive fallback: the collection starts over empty.
        eprintln!("Warning: {err}. Starting with an empty task list.");
    }

    let now = Utc::now();
    match cli.command {
        Commands::Add {
            name,
            description,
            deadline,
            safe,
        } => {
            require_non_empty("name", &name)?;
            require_non_empty("description", &description)?;
            let deadline = parse_human_date(&deadline)?;
            let safe = parse_human_date(&safe)?;
            let id = store.add(Task::new(name, description, deadline, safe, now), now)?;
            let task = store.get(id).ok_or_else(|| anyhow!("task vanished after add"))?;
            println!("Task added: {} (ID: {})", task.name, task.id);
            println!("  Safe date: {}", task.safe_date.format("%Y-%m-%d"));
            println!("  Deadline:  {}", task.deadline_date.format("%Y-%m-%d"));
            println!("  Days left: {}", task.remaining_days(now));
        }
        Commands::Edit {
            id,
            name,
            description,
            deadline,
            safe,
        } => {
            require_non_empty("name", &name)?;
            require_non_empty("description", &description)?;
            let deadline = parse_human_date(&deadline)?;
            let safe = parse_human_date(&safe)?;
            if store.get(id).is_none() {
                println!("No task with ID {}.", id);
            } else {
                let mut update = Task::new(name, description, deadline, safe, now);
                update.id = id;
                store.edit(update, now)?;
                println!("Task {} updated.", id);
            }
        }
        Commands::Done { id } => {
            if store.get(id).is_none() {
                println!("No task with ID {}.", id);
            } else {
                store.complete(id, now)?;
                println!("Task {} completed.", id);
            }
        }
        Commands::Restore { id } => {
            if store.get(id).is_none() {
                println!("No task with ID {}.", id);
            } else {
                store.restore(id)?;
                println!("Task {} reopened.", id);
            }
        }
        Commands::Delete { id } => {
            if store.get(id).is_none() {
                println!("No task with ID {}.", id);
            } else {
                store.delete(id)?;
                println!("Task {} deleted.", id);
            }
        }
        Commands::List => {
            render::print_tasks(store.tasks(), now);
        }
        Commands::Stats => {
            let stats = duetrack_core::compute_stats(store.tasks(), now);
            render::print_stats(&stats);
        }
    }

    Ok(())
}
